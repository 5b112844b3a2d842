/*
 * Responsibility
 * - URL 構造を定義
 * - 公開パス (/, /health, /signup, /login) は middleware::auth::access の allow-list と揃える
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    auth::{login, sign_up},
    home::{health, home},
    posts::{create_post, delete_post, get_post, list_posts, update_post},
    users::{delete_me, get_user, list_users, me, update_me},
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/me", get(me).put(update_me).delete(delete_me))
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
