//! access token 検証 → Claims を extensions に入れる
//!
//! - 公開パス (allow-list) は検証せずにそのまま通す
//! - それ以外は `Authorization` の token を検証し、失敗したら 401 で打ち切る
//! - handler は `AuthClaims` extractor で Claims を引数として受け取る

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Paths forwarded without token verification.
pub const PUBLIC_PATHS: &[&str] = &["/", "/health", "/signup", "/login"];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Put the access gate in front of every route of `router`.
///
/// ```ignore
/// let router = middleware::auth::access::apply(api::routes(), state.clone());
/// let app = router.with_state(state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Raw token from `Authorization`, trimmed. A `Bearer ` scheme is optional.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .trim();

    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };

    (!token.is_empty()).then_some(token)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_path(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let Some(token) = extract_token(req.headers()) else {
        tracing::warn!(path = %req.uri().path(), "missing access token");
        return Err(AuthError::MissingToken.into());
    };

    let claims = match state.auth.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                path = %req.uri().path(),
                reason = err.code(),
                "access token verification failed"
            );
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し (request-scoped)
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
