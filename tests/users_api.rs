mod common;

use axum::http::StatusCode;
use common::{app, memory_state, register, request, send};
use serde_json::json;

#[tokio::test]
async fn sign_up_and_login_flow() {
    let app = app(memory_state());
    let (id, token) = register(&app, "Flow@Example.com").await;

    let (status, me) = send(&app, request("GET", "/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id);
    assert_eq!(me["email"], "flow@example.com");
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let app = app(memory_state());
    register(&app, "dup@example.com").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/signup",
            None,
            Some(json!({ "email": "dup@example.com", "password": "password123" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn bad_credentials_are_401() {
    let app = app(memory_state());
    register(&app, "who@example.com").await;

    for creds in [
        json!({ "email": "who@example.com", "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": "password123" }),
    ] {
        let (status, body) = send(&app, request("POST", "/login", None, Some(creds))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    }
}

#[tokio::test]
async fn weak_sign_up_is_400() {
    let app = app(memory_state());

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/signup",
            None,
            Some(json!({ "email": "short@example.com", "password": "123" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_and_delete_self() {
    let app = app(memory_state());
    let (id, token) = register(&app, "old@example.com").await;
    let (_, other) = register(&app, "taken@example.com").await;

    let (status, body) = send(
        &app,
        request("PUT", "/me", Some(&token), Some(json!({ "email": "taken@example.com" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, body) = send(
        &app,
        request("PUT", "/me", Some(&token), Some(json!({ "email": "new@example.com" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "new@example.com");

    let (status, _) = send(&app, request("GET", &format!("/users/{id}"), Some(&other), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, request("DELETE", "/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted");

    // the token still verifies, but its user no longer exists
    let (status, _) = send(&app, request("GET", "/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn token_of_a_deleted_user_cannot_create_posts() {
    let app = app(memory_state());
    let (_, token) = register(&app, "gone@example.com").await;

    let (status, _) = send(&app, request("DELETE", "/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        request("POST", "/posts", Some(&token), Some(json!({ "post_content": "x" }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    assert_eq!(body["error"]["message"], "user not found");

    let (_, posts) = send(&app, request("GET", "/posts", Some(&token), None)).await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn list_and_get_users() {
    let app = app(memory_state());
    let (first, token) = register(&app, "first@example.com").await;
    let (second, _) = register(&app, "second@example.com").await;

    let (status, users) = send(&app, request("GET", "/users", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);

    let (status, _) = send(&app, request("GET", "/users/999", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, request("GET", "/users/not-a-number", Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_USER_ID");
}
