use chrono::{DateTime, Utc};
use ulid::Ulid;

/// A post owned by `user_id`.
///
/// - `id` is a ULID generated by the caller before insert (sortable by creation time)
/// - `user_id` never changes after creation; update/delete are scoped by it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub post_content: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Build a new post with a freshly generated id.
    pub fn create(post_content: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: Ulid::new().to_string(),
            post_content: post_content.into(),
            user_id,
            created_at: Utc::now(),
        }
    }
}
