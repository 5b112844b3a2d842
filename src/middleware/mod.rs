/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access (token gate), http (request id / trace / timeout / body limit)
 */
pub mod auth;
pub mod http;
