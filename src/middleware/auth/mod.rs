pub mod access;

pub use access::{PUBLIC_PATHS, is_public_path};
