#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use rest_ws::{
    app::build_router,
    repos::{MemoryStore, Repositories},
    services::auth::TokenService,
    state::AppState,
};

pub const SECRET: &str = "integration-secret";
pub const TTL_SECONDS: u64 = 3600;

pub fn memory_state() -> AppState {
    let repos = Repositories::with_backend(Arc::new(MemoryStore::new(10))).unwrap();
    state_with(repos)
}

pub fn state_with(repos: Repositories) -> AppState {
    AppState::new(
        Arc::new(TokenService::new(SECRET, TTL_SECONDS)),
        Arc::new(repos),
    )
}

pub fn app(state: AppState) -> Router {
    build_router(state, Duration::from_secs(5))
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Sign up `email` and log in; returns (user id, token).
pub async fn register(app: &Router, email: &str) -> (i64, String) {
    let creds = serde_json::json!({ "email": email, "password": "password123" });

    let (status, body) = send(app, request("POST", "/signup", None, Some(creds.clone()))).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(app, request("POST", "/login", None, Some(creds))).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let token = body["token"].as_str().unwrap().to_string();

    (id, token)
}
