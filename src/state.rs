/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - token service と bind 済みの repositories
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::Repositories;
use crate::services::auth::TokenService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<TokenService>,
    pub repos: Arc<Repositories>,
}

impl AppState {
    pub fn new(auth: Arc<TokenService>, repos: Arc<Repositories>) -> Self {
        Self { auth, repos }
    }
}
