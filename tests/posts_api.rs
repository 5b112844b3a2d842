mod common;

use axum::http::StatusCode;
use common::{app, memory_state, register, request, send, state_with};
use rest_ws::repos::Repositories;
use serde_json::json;

#[tokio::test]
async fn missing_post_is_404_not_500() {
    let state = memory_state();
    let token = state.auth.issue(7).unwrap();
    let app = app(state);

    let (status, body) = send(&app, request("GET", "/posts/abc", Some(&token), None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "post not found");
}

#[tokio::test]
async fn create_then_get_post() {
    let app = app(memory_state());
    let (user_id, token) = register(&app, "writer@example.com").await;

    let (status, created) = send(
        &app,
        request("POST", "/posts", Some(&token), Some(json!({ "post_content": "hello" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["post_content"], "hello");
    assert_eq!(created["user_id"], user_id);
    let id = created["id"].as_str().unwrap();
    assert_eq!(id.len(), 26); // ULID

    let (status, fetched) = send(&app, request("GET", &format!("/posts/{id}"), Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn only_the_owner_can_update_or_delete() {
    let app = app(memory_state());
    let (_, owner) = register(&app, "owner@example.com").await;
    let (_, intruder) = register(&app, "intruder@example.com").await;

    let (_, created) = send(
        &app,
        request("POST", "/posts", Some(&owner), Some(json!({ "post_content": "original" }))),
    )
    .await;
    let uri = format!("/posts/{}", created["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        request("PUT", &uri, Some(&intruder), Some(json!({ "post_content": "defaced" }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, request("DELETE", &uri, Some(&intruder), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, fetched) = send(&app, request("GET", &uri, Some(&owner), None)).await;
    assert_eq!(fetched["post_content"], "original");

    let (status, body) = send(
        &app,
        request("PUT", &uri, Some(&owner), Some(json!({ "post_content": "edited" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post updated");

    let (_, fetched) = send(&app, request("GET", &uri, Some(&owner), None)).await;
    assert_eq!(fetched["post_content"], "edited");

    let (status, body) = send(&app, request("DELETE", &uri, Some(&owner), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted");

    let (status, _) = send(&app, request("GET", &uri, Some(&owner), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_creates_both_show_up_in_the_first_page() {
    let app = app(memory_state());
    let (_, token) = register(&app, "busy@example.com").await;

    let ((s1, a), (s2, b)) = tokio::join!(
        send(&app, request("POST", "/posts", Some(&token), Some(json!({ "post_content": "one" })))),
        send(&app, request("POST", "/posts", Some(&token), Some(json!({ "post_content": "two" })))),
    );
    assert_eq!(s1, StatusCode::CREATED);
    assert_eq!(s2, StatusCode::CREATED);
    assert_ne!(a["id"], b["id"]);

    let (status, page) = send(&app, request("GET", "/posts?page=0", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a["id"].as_str().unwrap()));
    assert!(ids.contains(&b["id"].as_str().unwrap()));
}

#[tokio::test]
async fn listing_is_paged_and_ordered() {
    let app = app(memory_state());
    let (_, token) = register(&app, "pager@example.com").await;

    let mut ids = Vec::new();
    for i in 0..12 {
        let (_, created) = send(
            &app,
            request("POST", "/posts", Some(&token), Some(json!({ "post_content": format!("post {i}") }))),
        )
        .await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let (_, first) = send(&app, request("GET", "/posts", Some(&token), None)).await;
    let (_, second) = send(&app, request("GET", "/posts?page=1", Some(&token), None)).await;
    let (status, third) = send(&app, request("GET", "/posts?page=9", Some(&token), None)).await;

    let listed: Vec<String> = first
        .as_array()
        .unwrap()
        .iter()
        .chain(second.as_array().unwrap())
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(listed, ids);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(third, json!([]));
}

#[tokio::test]
async fn bad_input_is_400() {
    let app = app(memory_state());
    let (_, token) = register(&app, "sloppy@example.com").await;

    let (status, body) = send(&app, request("GET", "/posts?page=abc", Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_PAGE");

    let (status, body) = send(
        &app,
        request("POST", "/posts", Some(&token), Some(json!({ "postContent": "wrong casing" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_BODY");

    let (status, _) = send(
        &app,
        request("POST", "/posts", Some(&token), Some(json!({ "post_content": "   " }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unbound_repositories_surface_as_500() {
    let state = state_with(Repositories::new());
    let token = state.auth.issue(1).unwrap();
    let app = app(state);

    let (status, body) = send(&app, request("GET", "/posts", Some(&token), None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
}
