/*
 * Responsibility
 * - Posts の request/response DTO
 * - field 名は snake_case (post_content) に統一
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Post;

const MAX_POST_CONTENT_LEN: usize = 10_000;

/// Body for both create and update.
#[derive(Debug, Deserialize)]
pub struct UpsertPostRequest {
    pub post_content: String,
}

impl UpsertPostRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.post_content.trim().is_empty() {
            return Err("post_content is required");
        }
        if self.post_content.len() > MAX_POST_CONTENT_LEN {
            return Err("post_content must be <= 10000 bytes");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub post_content: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            post_content: post.post_content,
            user_id: post.user_id,
            created_at: post.created_at,
        }
    }
}
