use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{AuthError, Claims};

/// Handler で、検証済みの Claims を受け取るための extractor
/// middleware が Claims を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定・公開パス）
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}
