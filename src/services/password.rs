/*
 * Responsibility
 * - Password hashing for signup and verification for login
 * - Hashes are PHC strings (algorithm + params + salt embedded)
 */
use std::sync::LazyLock;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
}

/// `false` for a wrong password and for a hash that cannot be parsed.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// hashed with the same params as real accounts
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash("no-such-account").ok());

/// Pay one verify for a login with an unknown email; the result is discarded.
pub fn verify_dummy(password: &str) {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
}
