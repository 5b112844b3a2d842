pub mod claims;
pub mod error;
pub mod token;

pub use claims::Claims;
pub use error::AuthError;
pub use token::{TokenService, verify, verify_at};
