/*
 * Responsibility
 * - posts の repository contract (backend 非依存)
 * - caller supplies the id (ULID) on insert
 * - update/delete predicates always include the owner (user_id)
 */
use async_trait::async_trait;

use crate::models::Post;
use crate::repos::error::RepoResult;

#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn insert_post(&self, post: &Post) -> RepoResult<()>;

    async fn get_post_by_id(&self, id: &str) -> RepoResult<Post>;

    /// Replace the content of `post.id` if it belongs to `owner_id`.
    /// The stored owner is never changed.
    async fn update_post(&self, post: &Post, owner_id: i64) -> RepoResult<()>;

    async fn delete_post(&self, id: &str, owner_id: i64) -> RepoResult<()>;

    /// Zero-based page in creation order. Past the end yields an empty vec.
    async fn list_posts(&self, page: u64) -> RepoResult<Vec<Post>>;

    async fn close(&self) -> RepoResult<()>;
}
