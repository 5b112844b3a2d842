use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::services::auth::{AuthError, Claims};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Verify `token` against `secret` using the current time.
pub fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    verify_at(token, secret, chrono::Utc::now().timestamp())
}

/// Verify `token` against `secret` as of `now` (unix seconds).
///
/// Checks, in order:
/// - the token parses and its header declares HS256
/// - the payload has the `Claims` shape and `now < exp`
/// - the signature matches `secret`
///
/// Expiry is judged before the signature, so an expired token reports `Expired`
/// whichever key signed it.
pub fn verify_at(token: &str, secret: &str, now: i64) -> Result<Claims, AuthError> {
    let header = jsonwebtoken::decode_header(token).map_err(|_| AuthError::MalformedToken)?;
    if header.alg != ALGORITHM {
        return Err(AuthError::SignatureInvalid);
    }

    let key = DecodingKey::from_secret(secret.as_bytes());

    let unverified = jsonwebtoken::decode::<Claims>(token, &key, &unverified_validation())?;
    if unverified.claims.is_expired_at(now) {
        return Err(AuthError::Expired);
    }

    let verified = jsonwebtoken::decode::<Claims>(token, &key, &signature_validation())?;
    Ok(verified.claims)
}

// Expiry is checked by hand against an explicit `now`, so jsonwebtoken's own
// clock-based checks stay off in both passes.
fn signature_validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.required_spec_claims.clear();
    validation
}

fn unverified_validation() -> Validation {
    let mut validation = signature_validation();
    validation.insecure_disable_signature_validation();
    validation
}

/// Issues and verifies HS256 access tokens with a shared secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    encoding_key: EncodingKey,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &ALGORITHM)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            secret: secret.to_string(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_id, chrono::Utc::now().timestamp())
    }

    /// Sign fresh claims for `user_id` issued at `now`.
    pub fn issue_at(&self, user_id: i64, now: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new(user_id, now, self.ttl_seconds);
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        verify(token, &self.secret)
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        verify_at(token, &self.secret, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "test-secret";
    const NOW: i64 = 1_700_000_000;

    fn sign_with(secret: &str, claims: &Claims) -> String {
        TokenService::new(secret, 3600).sign(claims).unwrap()
    }

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue_at(7, NOW).unwrap();

        let claims = service.verify_at(&token, NOW + 10).unwrap();
        assert_eq!(claims, Claims::new(7, NOW, 3600));
        assert_eq!(claims.exp, NOW + 3600);
    }

    #[test]
    fn verify_uses_wall_clock() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue(42).unwrap();

        assert_eq!(verify(&token, SECRET).unwrap().user_id, 42);
    }

    #[test]
    fn wrong_secret_is_signature_invalid() {
        let token = sign_with(SECRET, &Claims::new(7, NOW, 3600));

        assert_eq!(
            verify_at(&token, "another-secret", NOW),
            Err(AuthError::SignatureInvalid)
        );
    }

    #[test]
    fn expired_token_is_expired_even_with_a_foreign_signature() {
        let claims = Claims::new(7, NOW - 7200, 3600);

        let ours = sign_with(SECRET, &claims);
        let theirs = sign_with("someone-else", &claims);

        assert_eq!(verify_at(&ours, SECRET, NOW), Err(AuthError::Expired));
        assert_eq!(verify_at(&theirs, SECRET, NOW), Err(AuthError::Expired));
    }

    #[test]
    fn token_expires_exactly_at_exp() {
        let token = sign_with(SECRET, &Claims::new(7, NOW, 60));

        assert!(verify_at(&token, SECRET, NOW + 59).is_ok());
        assert_eq!(verify_at(&token, SECRET, NOW + 60), Err(AuthError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            verify_at("not-a-token", SECRET, NOW),
            Err(AuthError::MalformedToken)
        );
        assert_eq!(
            verify_at("a.b.c", SECRET, NOW),
            Err(AuthError::MalformedToken)
        );
        assert_eq!(verify_at("", SECRET, NOW), Err(AuthError::MalformedToken));
    }

    #[test]
    fn foreign_payload_is_claims_type_mismatch() {
        let payload = json!({ "sub": "someone", "exp": NOW + 3600 });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify_at(&token, SECRET, NOW),
            Err(AuthError::ClaimsTypeMismatch)
        );
    }

    #[test]
    fn unexpected_algorithm_is_rejected() {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &Claims::new(7, NOW, 3600),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify_at(&token, SECRET, NOW),
            Err(AuthError::SignatureInvalid)
        );
    }

    #[test]
    fn oversized_ttl_still_issues_a_live_token() {
        let service = TokenService::new(SECRET, u64::MAX);
        let token = service.issue_at(1, NOW).unwrap();

        assert_eq!(service.verify_at(&token, NOW).unwrap().exp, i64::MAX);
    }

    #[test]
    fn debug_does_not_print_the_secret() {
        let service = TokenService::new("super-secret-value", 60);
        let printed = format!("{service:?}");

        assert!(!printed.contains("super-secret-value"));
    }
}
