pub mod error;
pub mod memory;
pub mod post_repo;
pub mod postgres;
pub mod registry;
pub mod user_repo;

pub use error::{RepoError, RepoResult};
pub use memory::MemoryStore;
pub use post_repo::PostRepository;
pub use postgres::PgStore;
pub use registry::{RegistryError, Repositories};
pub use user_repo::UserRepository;

/// Offset of a zero-based page, saturating instead of overflowing.
pub(crate) fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_mul(page_size)
}
