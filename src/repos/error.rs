/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - NotFound is a sentinel, distinct from backend failures
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    /// No row matched (for owner-scoped writes: missing or owned by someone else).
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    /// The row references a user that does not exist (e.g. deleted after the token was issued).
    #[error("owner does not exist")]
    MissingOwner,
    /// A repository was used before a backend was bound for its entity family.
    #[error("no {0} repository bound")]
    Unbound(&'static str),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("db error")]
    Db(#[source] sqlx::Error),
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return RepoError::NotFound;
        }
        if let sqlx::Error::Database(dbe) = &e {
            match dbe.code().as_deref() {
                Some("23505") => return RepoError::Conflict,
                Some("23503") => return RepoError::MissingOwner, // foreign_key_violation
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::from_sqlx(e)
    }
}
