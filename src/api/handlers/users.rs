/*
 * Responsibility
 * - /me (自分自身の取得・更新・削除) と /users 系の参照 handler
 * - 更新・削除は Claims の user_id を owner として repository に渡す
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::{
        dto::{
            common::MessageResponse,
            users::{UpdateUserRequest, UserResponse},
        },
        extractors::{AuthClaims, JsonBody, PageQuery},
    },
    error::AppError,
    repos::RepoError,
    state::AppState,
};

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request("INVALID_USER_ID", "user id must be an integer"))
}

pub async fn me(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .repos
        .get_user_by_id(claims.user_id)
        .await
        .map_err(|e| AppError::from_repo("user", e))?;

    Ok(Json(user.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_BODY", msg))?;

    let mut user = state
        .repos
        .get_user_by_id(claims.user_id)
        .await
        .map_err(|e| AppError::from_repo("user", e))?;
    user.email = req.email.trim().to_ascii_lowercase();

    state
        .repos
        .update_user(&user, claims.user_id)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("EMAIL_TAKEN", "email is already registered"),
            other => AppError::from_repo("user", other),
        })?;

    Ok(Json(user.into()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .repos
        .delete_user(claims.user_id, claims.user_id)
        .await
        .map_err(|e| AppError::from_repo("user", e))?;

    tracing::info!(user_id = claims.user_id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

pub async fn list_users(
    State(state): State<AppState>,
    _claims: AuthClaims,
    PageQuery(page): PageQuery,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.repos.list_users(page).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let user = state
        .repos
        .get_user_by_id(user_id)
        .await
        .map_err(|e| AppError::from_repo("user", e))?;

    Ok(Json(user.into()))
}
