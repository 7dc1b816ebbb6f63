//! Bearer-token validation

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Identity claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user name; admits the request, not used beyond that
    pub username: String,

    /// Expiry as seconds since the Unix epoch
    pub exp: usize,
}

/// Validates bearer tokens against the shared signing secret
///
/// Signature and expiry are the only checks performed. The verifier is built
/// once at startup from configuration and shared read-only across requests;
/// it never issues or re-signs tokens.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Create a verifier for HS256 tokens signed with `secret`
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Validate a raw `Authorization` header value
    ///
    /// The header must carry the `Bearer` scheme. Returns the decoded claims
    /// on success; any scheme, signature, or expiry failure maps to a 401.
    pub fn verify_header(&self, header: &str) -> Result<Claims, ApiError> {
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid token"))?;

        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::unauthorized("Invalid token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_token(secret: &str, exp_offset_secs: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_secs() as i64;
        let claims = Claims {
            username: "demo".to_string(),
            exp: (now + exp_offset_secs) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("token encodes")
    }

    #[test]
    fn test_valid_token_accepted() {
        let verifier = JwtVerifier::new("test-secret");
        let header = format!("Bearer {}", make_token("test-secret", 3600));
        let claims = verifier.verify_header(&header).expect("valid token");
        assert_eq!(claims.username, "demo");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        let header = format!("Bearer {}", make_token("other-secret", 3600));
        let error = verifier.verify_header(&header).unwrap_err();
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        let header = format!("Bearer {}", make_token("test-secret", -3600));
        let error = verifier.verify_header(&header).unwrap_err();
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_bearer_scheme_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        let token = make_token("test-secret", 3600);
        let error = verifier.verify_header(&token).unwrap_err();
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let verifier = JwtVerifier::new("test-secret");
        let error = verifier.verify_header("Bearer not.a.token").unwrap_err();
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
    }
}
