pub mod auth;
pub mod common;
pub mod posts;
pub mod users;
