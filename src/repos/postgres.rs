/*
 * Responsibility
 * - users / posts テーブル向け SQLx 操作 (durable backend)
 * - PgPool を持ち、repository contract を実装する
 * - update/delete の WHERE には必ず owner を含める
 * - posts.user_id の FK (CASCADE) 前提でユーザー削除挙動を意識
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions};

use crate::models::{NewUser, Post, User};
use crate::repos::{
    error::{RepoError, RepoResult},
    page_offset,
    post_repo::PostRepository,
    user_repo::UserRepository,
};

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: String,
    post_content: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            post_content: row.post_content,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
    page_size: i64,
}

impl PgStore {
    pub fn new(pool: PgPool, page_size: u64) -> Self {
        Self {
            pool,
            page_size: i64::try_from(page_size.max(1)).unwrap_or(i64::MAX),
        }
    }

    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        page_size: u64,
    ) -> Result<Self, RepoError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool, page_size))
    }

    /// Apply the embedded migrations under `migrations/`.
    pub async fn migrate(&self) -> Result<(), RepoError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepoError::Backend(e.to_string()))
    }

    fn limit_offset(&self, page: u64) -> (i64, i64) {
        let offset = page_offset(page, self.page_size as u64);
        (self.page_size, i64::try_from(offset).unwrap_or(i64::MAX))
    }
}

fn expect_one_row(rows_affected: u64) -> RepoResult<()> {
    if rows_affected == 0 {
        return Err(RepoError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl UserRepository for PgStore {
    async fn insert_user(&self, user: NewUser) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_user_by_id(&self, id: i64) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from).ok_or(RepoError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from).ok_or(RepoError::NotFound)
    }

    async fn update_user(&self, user: &User, owner_id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $3, password_hash = $4
            WHERE id = $1 AND id = $2
            "#,
        )
        .bind(user.id)
        .bind(owner_id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        expect_one_row(result.rows_affected())
    }

    async fn delete_user(&self, id: i64, owner_id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1 AND id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        expect_one_row(result.rows_affected())
    }

    async fn list_users(&self, page: u64) -> RepoResult<Vec<User>> {
        let (limit, offset) = self.limit_offset(page);
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn close(&self) -> RepoResult<()> {
        // PgPool::close is idempotent
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for PgStore {
    async fn insert_post(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, post_content, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&post.id)
        .bind(&post.post_content)
        .bind(post.user_id)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_post_by_id(&self, id: &str) -> RepoResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, post_content, user_id, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Post::from).ok_or(RepoError::NotFound)
    }

    async fn update_post(&self, post: &Post, owner_id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET post_content = $3
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(&post.id)
        .bind(owner_id)
        .bind(&post.post_content)
        .execute(&self.pool)
        .await?;

        expect_one_row(result.rows_affected())
    }

    async fn delete_post(&self, id: &str, owner_id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        expect_one_row(result.rows_affected())
    }

    async fn list_posts(&self, page: u64) -> RepoResult<Vec<Post>> {
        let (limit, offset) = self.limit_offset(page);
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, post_content, user_id, created_at
            FROM posts
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn close(&self) -> RepoResult<()> {
        self.pool.close().await;
        Ok(())
    }
}
