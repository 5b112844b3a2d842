/*
 * Responsibility
 * - In-memory backend for tests and local runs (STORAGE_BACKEND=memory)
 * - users と posts を同じ lock で持つ (ユーザー削除時の cascade のため)
 * - every write happens under one lock acquisition, so it is all-or-nothing
 */
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{NewUser, Post, User};
use crate::repos::{
    error::{RepoError, RepoResult},
    page_offset,
    post_repo::PostRepository,
    user_repo::UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    last_user_id: i64,
    // insertion order == creation order
    posts: Vec<Post>,
    closed: bool,
}

impl Tables {
    fn ensure_open(&self) -> RepoResult<()> {
        if self.closed {
            return Err(RepoError::Backend("memory store is closed".into()));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    page_size: u64,
}

impl MemoryStore {
    pub fn new(page_size: u64) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            page_size: page_size.max(1),
        }
    }

    fn page<T: Clone>(&self, rows: impl Iterator<Item = T>, page: u64) -> Vec<T> {
        let skip = page_offset(page, self.page_size);
        rows.skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(self.page_size as usize)
            .collect()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> RepoResult<User> {
        let mut tables = self.tables.write().await;
        tables.ensure_open()?;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict);
        }

        tables.last_user_id += 1;
        let stored = user.with_id(tables.last_user_id);
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_user_by_id(&self, id: i64) -> RepoResult<User> {
        let tables = self.tables.read().await;
        tables.ensure_open()?;
        tables.users.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> RepoResult<User> {
        let tables = self.tables.read().await;
        tables.ensure_open()?;
        tables
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn update_user(&self, user: &User, owner_id: i64) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_open()?;

        if user.id != owner_id || !tables.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepoError::Conflict);
        }

        if let Some(row) = tables.users.get_mut(&user.id) {
            row.email = user.email.clone();
            row.password_hash = user.password_hash.clone();
        }
        Ok(())
    }

    async fn delete_user(&self, id: i64, owner_id: i64) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_open()?;

        if id != owner_id || tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // posts.user_id REFERENCES users ON DELETE CASCADE
        tables.posts.retain(|p| p.user_id != id);
        Ok(())
    }

    async fn list_users(&self, page: u64) -> RepoResult<Vec<User>> {
        let tables = self.tables.read().await;
        tables.ensure_open()?;
        Ok(self.page(tables.users.values().cloned(), page))
    }

    async fn close(&self) -> RepoResult<()> {
        self.tables.write().await.closed = true;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert_post(&self, post: &Post) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_open()?;

        if !tables.users.contains_key(&post.user_id) {
            return Err(RepoError::MissingOwner);
        }
        if tables.posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Conflict);
        }

        tables.posts.push(post.clone());
        Ok(())
    }

    async fn get_post_by_id(&self, id: &str) -> RepoResult<Post> {
        let tables = self.tables.read().await;
        tables.ensure_open()?;
        tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn update_post(&self, post: &Post, owner_id: i64) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_open()?;

        let row = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post.id && p.user_id == owner_id)
            .ok_or(RepoError::NotFound)?;
        row.post_content = post.post_content.clone();
        Ok(())
    }

    async fn delete_post(&self, id: &str, owner_id: i64) -> RepoResult<()> {
        let mut tables = self.tables.write().await;
        tables.ensure_open()?;

        let idx = tables
            .posts
            .iter()
            .position(|p| p.id == id && p.user_id == owner_id)
            .ok_or(RepoError::NotFound)?;
        tables.posts.remove(idx);
        Ok(())
    }

    async fn list_posts(&self, page: u64) -> RepoResult<Vec<Post>> {
        let tables = self.tables.read().await;
        tables.ensure_open()?;
        Ok(self.page(tables.posts.iter().cloned(), page))
    }

    async fn close(&self) -> RepoResult<()> {
        self.tables.write().await.closed = true;
        Ok(())
    }
}
