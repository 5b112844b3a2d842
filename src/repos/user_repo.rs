/*
 * Responsibility
 * - users の repository contract (backend 非依存)
 * - backend assigns the id on insert
 * - update/delete are scoped to the owner (a user owns only itself)
 */
use async_trait::async_trait;

use crate::models::{NewUser, User};
use crate::repos::error::RepoResult;

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Store a new user; the returned value carries the assigned id.
    async fn insert_user(&self, user: NewUser) -> RepoResult<User>;

    async fn get_user_by_id(&self, id: i64) -> RepoResult<User>;

    async fn get_user_by_email(&self, email: &str) -> RepoResult<User>;

    /// Update `user` only if `user.id == owner_id`; otherwise `NotFound`.
    async fn update_user(&self, user: &User, owner_id: i64) -> RepoResult<()>;

    async fn delete_user(&self, id: i64, owner_id: i64) -> RepoResult<()>;

    /// Zero-based page ordered by id. Past the end yields an empty vec.
    async fn list_users(&self, page: u64) -> RepoResult<Vec<User>>;

    async fn close(&self) -> RepoResult<()>;
}
