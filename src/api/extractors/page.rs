use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct RawPage {
    page: Option<String>,
}

/// Zero-based page number from `?page=N`; missing or empty means 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery(pub u64);

impl PageQuery {
    fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self(0)),
            Some(value) => value
                .parse::<u64>()
                .map(Self)
                .map_err(|_| AppError::bad_request("INVALID_PAGE", "page must be a non-negative integer")),
        }
    }
}

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPage>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request("INVALID_QUERY", rejection.body_text()))?;

        Self::parse(raw.page.as_deref())
    }
}
