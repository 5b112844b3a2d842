use serde::{Deserialize, Serialize};

/// Identity payload carried by an access token.
///
/// - `exp` / `iat` are unix timestamps (seconds)
/// - never persisted; rebuilt from the token on every authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64, issued_at: i64, ttl_seconds: u64) -> Self {
        Self {
            user_id,
            exp: issued_at.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)),
            iat: issued_at,
        }
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
