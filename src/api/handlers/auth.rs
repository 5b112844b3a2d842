/*
 * Responsibility
 * - POST /signup: password を hash してユーザー作成
 * - POST /login: credential を確認して access token を発行
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::{
            auth::{LoginResponse, SignUpLoginRequest},
            users::UserResponse,
        },
        extractors::JsonBody,
    },
    error::AppError,
    models::NewUser,
    repos::RepoError,
    services::password,
    state::AppState,
};

fn invalid_credentials() -> AppError {
    AppError::unauthorized("INVALID_CREDENTIALS", "invalid email or password")
}

pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignUpLoginRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate_sign_up()
        .map_err(|msg| AppError::bad_request("INVALID_BODY", msg))?;

    let password_hash = password::hash(&req.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal
    })?;

    let user = state
        .repos
        .insert_user(NewUser::new(req.normalized_email(), password_hash))
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("EMAIL_TAKEN", "email is already registered"),
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, "user signed up");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignUpLoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate_login()
        .map_err(|msg| AppError::bad_request("INVALID_BODY", msg))?;

    let user = match state.repos.get_user_by_email(&req.normalized_email()).await {
        Ok(user) => user,
        Err(RepoError::NotFound) => {
            password::verify_dummy(&req.password);
            return Err(invalid_credentials());
        }
        Err(e) => return Err(e.into()),
    };

    if !password::verify(&req.password, &user.password_hash) {
        tracing::warn!(user_id = user.id, "login with wrong password");
        return Err(invalid_credentials());
    }

    let token = state.auth.issue(user.id).map_err(|e| {
        tracing::error!(error = %e, "failed to sign access token");
        AppError::Internal
    })?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.auth.ttl_seconds(),
    }))
}
