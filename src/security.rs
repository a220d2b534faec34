//! Password hashing (Argon2id) and access-token issuance (HS256).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AuthConfig;
use crate::error::AppError;

/// Fixed `aud` claim carried by every account token.
pub const TOKEN_AUDIENCE: &str = "account";

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — account ID (UUID string).
    pub sub: String,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Audience.
    pub aud: String,
    /// Caller-supplied claims, omitted from the payload when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Map<String, Value>>,
}

/// Issue a signed, time-limited token for `subject`, embedding any
/// caller-supplied claims. Signing uses the single shared secret from the
/// auth configuration.
pub fn create_access_token(
    subject: &str,
    claims: Option<Map<String, Value>>,
    auth: &AuthConfig,
) -> Result<String, AppError> {
    let expire = Utc::now() + Duration::minutes(auth.access_token_expire_minutes);
    let payload = TokenClaims {
        sub: subject.to_string(),
        exp: expire.timestamp(),
        aud: TOKEN_AUDIENCE.to_string(),
        claims,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(auth.secret_key.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {e}")))
}

/// Decode and verify an access token (signature, expiry, audience).
#[allow(unused)]
pub fn decode_access_token(token: &str, auth: &AuthConfig) -> Result<TokenClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[TOKEN_AUDIENCE]);

    jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(auth.secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(e.to_string()))
}

/// One-way salted hash of a plaintext password, in PHC string format.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; errors only when the stored hash is
/// malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret_key: "test-secret-key".to_string(),
            access_token_expire_minutes: 30,
        }
    }

    /// Decode the payload segment without verifying the signature.
    fn raw_payload(token: &str) -> Value {
        let segment = token.split('.').nth(1).expect("payload segment");
        let bytes = URL_SAFE_NO_PAD.decode(segment).expect("base64 payload");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[test]
    fn token_contains_expected_claims() {
        let config = test_config();
        let mut claims = Map::new();
        claims.insert("role".to_string(), Value::String("admin".to_string()));

        let token = create_access_token("user123", Some(claims.clone()), &config).unwrap();
        let decoded = decode_access_token(&token, &config).unwrap();

        assert_eq!(decoded.sub, "user123");
        assert_eq!(decoded.aud, TOKEN_AUDIENCE);
        assert_eq!(decoded.claims, Some(claims));

        // exp should be roughly now + configured expiration.
        let expected = (Utc::now() + Duration::minutes(30)).timestamp();
        assert!((decoded.exp - expected).abs() < 5);
    }

    #[test]
    fn omitted_claims_leave_no_claims_field() {
        let config = test_config();
        let token = create_access_token("user456", None, &config).unwrap();

        let payload = raw_payload(&token);
        assert_eq!(payload["sub"], "user456");
        assert!(payload.get("claims").is_none());
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let config = test_config();
        let token = create_access_token("user123", None, &config).unwrap();

        let other = AuthConfig {
            secret_key: "another-secret".to_string(),
            access_token_expire_minutes: 30,
        };
        assert!(decode_access_token(&token, &other).is_err());
    }

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("mysecretpassword").unwrap();
        assert!(verify_password("mysecretpassword", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("mysecretpassword").unwrap();
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn hash_is_not_the_raw_password() {
        let hash = hash_password("anotherpassword").unwrap();
        assert_ne!(hash, "anotherpassword");
        assert!(verify_password("anotherpassword", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        assert!(verify_password("pw", "not-a-hash").is_err());
    }
}
