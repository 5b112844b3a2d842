/*
 * Responsibility
 * - entity family ごとに backend を一度だけ bind する (write-once / read-many)
 * - handler はこの型を経由してのみ repository を呼ぶ
 * - bind 前の呼び出しは RepoError::Unbound (起動順序のバグ)
 */
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::models::{NewUser, Post, User};
use crate::repos::{
    error::{RepoError, RepoResult},
    post_repo::PostRepository,
    user_repo::UserRepository,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{0} repository is already bound")]
    AlreadyBound(&'static str),
}

/// Late-bound storage backends, one per entity family.
///
/// Built and bound by startup, then shared read-only through `AppState`.
#[derive(Default)]
pub struct Repositories {
    users: OnceLock<Arc<dyn UserRepository>>,
    posts: OnceLock<Arc<dyn PostRepository>>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("users_bound", &self.users.get().is_some())
            .field("posts_bound", &self.posts.get().is_some())
            .finish()
    }
}

impl Repositories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind one backend to both families.
    pub fn with_backend<B>(backend: Arc<B>) -> Result<Self, RegistryError>
    where
        B: UserRepository + PostRepository,
    {
        let repos = Self::new();
        repos.set_user_repository(backend.clone())?;
        repos.set_post_repository(backend)?;
        Ok(repos)
    }

    pub fn set_user_repository(&self, repo: Arc<dyn UserRepository>) -> Result<(), RegistryError> {
        self.users
            .set(repo)
            .map_err(|_| RegistryError::AlreadyBound("user"))
    }

    pub fn set_post_repository(&self, repo: Arc<dyn PostRepository>) -> Result<(), RegistryError> {
        self.posts
            .set(repo)
            .map_err(|_| RegistryError::AlreadyBound("post"))
    }

    pub fn is_bound(&self) -> bool {
        self.users.get().is_some() && self.posts.get().is_some()
    }

    fn users(&self) -> RepoResult<&dyn UserRepository> {
        match self.users.get() {
            Some(repo) => Ok(repo.as_ref()),
            None => {
                tracing::error!(family = "user", "repository used before binding");
                Err(RepoError::Unbound("user"))
            }
        }
    }

    fn posts(&self) -> RepoResult<&dyn PostRepository> {
        match self.posts.get() {
            Some(repo) => Ok(repo.as_ref()),
            None => {
                tracing::error!(family = "post", "repository used before binding");
                Err(RepoError::Unbound("post"))
            }
        }
    }

    // users

    pub async fn insert_user(&self, user: NewUser) -> RepoResult<User> {
        self.users()?.insert_user(user).await
    }

    pub async fn get_user_by_id(&self, id: i64) -> RepoResult<User> {
        self.users()?.get_user_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> RepoResult<User> {
        self.users()?.get_user_by_email(email).await
    }

    pub async fn update_user(&self, user: &User, owner_id: i64) -> RepoResult<()> {
        self.users()?.update_user(user, owner_id).await
    }

    pub async fn delete_user(&self, id: i64, owner_id: i64) -> RepoResult<()> {
        self.users()?.delete_user(id, owner_id).await
    }

    pub async fn list_users(&self, page: u64) -> RepoResult<Vec<User>> {
        self.users()?.list_users(page).await
    }

    // posts

    pub async fn insert_post(&self, post: &Post) -> RepoResult<()> {
        self.posts()?.insert_post(post).await
    }

    pub async fn get_post_by_id(&self, id: &str) -> RepoResult<Post> {
        self.posts()?.get_post_by_id(id).await
    }

    pub async fn update_post(&self, post: &Post, owner_id: i64) -> RepoResult<()> {
        self.posts()?.update_post(post, owner_id).await
    }

    pub async fn delete_post(&self, id: &str, owner_id: i64) -> RepoResult<()> {
        self.posts()?.delete_post(id, owner_id).await
    }

    pub async fn list_posts(&self, page: u64) -> RepoResult<Vec<Post>> {
        self.posts()?.list_posts(page).await
    }

    /// Close every bound backend. Called once during shutdown.
    pub async fn close(&self) -> RepoResult<()> {
        self.users()?.close().await?;
        self.posts()?.close().await
    }
}
