use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::error::{AppError, Result};

/// JWT token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub exp: i64,
    pub iat: i64,
}

/// Why a bearer token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Create an HS256 access token for `user_id` with the configured lifetime
pub fn create_access_token(user_id: i64) -> Result<String> {
    create_token_with_secret(user_id, &CONFIG.auth.jwt_secret, CONFIG.auth.token_ttl_days)
}

pub fn create_token_with_secret(user_id: i64, secret: &str, ttl_days: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        user_id,
        exp: (now + Duration::days(ttl_days)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Decode and validate an access token using the configured secret
pub fn decode_token(token: &str) -> std::result::Result<Claims, TokenError> {
    decode_token_with_secret(token, &CONFIG.auth.jwt_secret)
}

pub fn decode_token_with_secret(
    token: &str,
    secret: &str,
) -> std::result::Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = create_token_with_secret(42, SECRET, 7).unwrap();
        let claims = decode_token_with_secret(&token, SECRET).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let token = create_token_with_secret(42, "another-secret", 7).unwrap();
        assert_eq!(
            decode_token_with_secret(&token, SECRET).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let token = create_token_with_secret(42, SECRET, -1).unwrap();
        assert_eq!(
            decode_token_with_secret(&token, SECRET).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(
            decode_token_with_secret("not-a-jwt", SECRET).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }
}
