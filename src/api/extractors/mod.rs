/*!
 * Request extractors
 *
 * - AuthClaims: middleware が検証済みの Claims を handler の引数として渡す
 * - JsonBody: JSON body (失敗時は 400 + AppError の body)
 * - PageQuery: `?page=N` (zero-based)
 */
mod auth_ctx;
mod json_body;
mod page;

pub use auth_ctx::AuthClaims;
pub use json_body::JsonBody;
pub use page::PageQuery;
