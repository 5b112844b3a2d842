/// A registered account. `id` is assigned by the backend on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// A user that has not been stored yet (no id).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    pub(crate) fn with_id(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}
