/*
 * Responsibility
 * - Users の request/response DTO
 * - password_hash は絶対に response に載せない
 */
use serde::{Deserialize, Serialize};

use crate::api::dto::auth::validate_email;
use crate::models::User;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}
