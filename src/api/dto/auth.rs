/*
 * Responsibility
 * - signup / login の request/response DTO
 */
use serde::{Deserialize, Serialize};

const MAX_EMAIL_LEN: usize = 254;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

#[derive(Debug, Deserialize)]
pub struct SignUpLoginRequest {
    pub email: String,
    pub password: String,
}

impl SignUpLoginRequest {
    /// Rules for new accounts.
    pub fn validate_sign_up(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("password must be at least 8 characters");
        }
        if self.password.len() > MAX_PASSWORD_LEN {
            return Err("password must be <= 128 bytes");
        }
        Ok(())
    }

    /// Login only checks presence; credential mismatch is reported as 401.
    pub fn validate_login(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }

    pub fn normalized_email(&self) -> String {
        self.email.trim().to_ascii_lowercase()
    }
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email is required");
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err("email must be <= 254 chars");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("email is invalid"),
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}
