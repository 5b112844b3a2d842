/*
 * Responsibility
 * - /posts 系 CRUD handler
 * - id (ULID) は作成時に handler で生成する
 * - 更新・削除は Claims の user_id を owner として渡す (他人の post は 404)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::{
        dto::{
            common::MessageResponse,
            posts::{PostResponse, UpsertPostRequest},
        },
        extractors::{AuthClaims, JsonBody, PageQuery},
    },
    error::AppError,
    models::Post,
    state::AppState,
};

pub async fn list_posts(
    State(state): State<AppState>,
    _claims: AuthClaims,
    PageQuery(page): PageQuery,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.repos.list_posts(page).await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    JsonBody(req): JsonBody<UpsertPostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_BODY", msg))?;

    // a verified token may outlive its user
    state
        .repos
        .get_user_by_id(claims.user_id)
        .await
        .map_err(|e| AppError::from_repo("user", e))?;

    let post = Post::create(req.post_content, claims.user_id);
    state.repos.insert_post(&post).await?;

    tracing::debug!(post_id = %post.id, user_id = claims.user_id, "post created");
    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn get_post(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state
        .repos
        .get_post_by_id(&post_id)
        .await
        .map_err(|e| AppError::from_repo("post", e))?;

    Ok(Json(post.into()))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(post_id): Path<String>,
    JsonBody(req): JsonBody<UpsertPostRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_BODY", msg))?;

    let post = Post {
        id: post_id,
        post_content: req.post_content,
        user_id: claims.user_id,
        created_at: chrono::Utc::now(),
    };

    state
        .repos
        .update_post(&post, claims.user_id)
        .await
        .map_err(|e| AppError::from_repo("post", e))?;

    Ok(Json(MessageResponse::new("Post updated")))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(post_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .repos
        .delete_post(&post_id, claims.user_id)
        .await
        .map_err(|e| AppError::from_repo("post", e))?;

    Ok(Json(MessageResponse::new("Post deleted")))
}
