use thiserror::Error;

/// Why a request could not be authenticated.
///
/// Every variant is surfaced as 401. Messages never include token material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing authorization token")]
    MissingToken,
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
    #[error("token claims do not match the expected shape")]
    ClaimsTypeMismatch,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::MalformedToken => "MALFORMED_TOKEN",
            AuthError::SignatureInvalid => "SIGNATURE_INVALID",
            AuthError::Expired => "TOKEN_EXPIRED",
            AuthError::ClaimsTypeMismatch => "CLAIMS_TYPE_MISMATCH",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::SignatureInvalid,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            // payload is valid base64 but not our claims
            ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                AuthError::ClaimsTypeMismatch
            }
            _ => AuthError::MalformedToken,
        }
    }
}
