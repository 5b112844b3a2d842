/*
 * Responsibility
 * - Entity shapes shared by handlers and repository backends
 * - No storage or HTTP concerns here
 */
pub mod post;
pub mod user;

pub use post::Post;
pub use user::{NewUser, User};
