/*
 * Responsibility
 * - GET / と GET /health (疎通用)
 * - どちらも公開パス (token 不要)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::api::dto::common::HomeResponse;

pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to rest-ws",
        status: true,
    })
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
