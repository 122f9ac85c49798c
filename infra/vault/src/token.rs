//! Signed bearer tokens: `mint(user_id, ttl, K)` / `parse(token, K)`.

use crate::error::VaultError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default lifetime of a minted bearer token.
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Stringified user id.
    sub: String,
    /// Expiry, seconds since the epoch.
    exp: u64,
}

/// Issues a signed token carrying `user_id` as its subject, expiring after `ttl`.
///
/// # Errors
/// Returns [`VaultError::Token`] if encoding fails.
pub fn mint(user_id: i64, ttl: Duration, key: &[u8]) -> Result<String, VaultError> {
    let claims = Claims { sub: user_id.to_string(), exp: now_secs() + ttl.as_secs() };

    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(key))
        .map_err(|source| VaultError::Token { source, context: Some("minting bearer token".into()) })
}

/// Verifies the signature (HMAC-SHA256 only) and expiry of `token`, returning the user id.
///
/// # Errors
/// Returns [`VaultError::InvalidToken`] for any missing, malformed, wrongly-signed, or
/// expired token. Failure detail is intentionally collapsed to avoid leaking oracle
/// information to callers.
pub fn parse(token: &str, key: &[u8]) -> Result<i64, VaultError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data =
        decode::<Claims>(token, &DecodingKey::from_secret(key), &validation).map_err(|_| {
            VaultError::InvalidToken {
                message: "token is missing, malformed, or expired".into(),
                context: None,
            }
        })?;

    data.claims.sub.parse::<i64>().map_err(|_| VaultError::InvalidToken {
        message: "token subject is not a valid user id".into(),
        context: None,
    })
}

fn now_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("system clock before epoch").as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"01234567890123456789012345678901";

    #[test]
    fn round_trips_before_expiry() {
        let token = mint(42, TOKEN_TTL, KEY).unwrap();
        assert_eq!(parse(&token, KEY).unwrap(), 42);
    }

    #[test]
    fn expired_token_is_invalid() {
        let token = mint(42, Duration::from_nanos(1), KEY).unwrap();
        std::thread::sleep(Duration::from_millis(1100));
        let err = parse(&token, KEY).unwrap_err();
        assert!(matches!(err, VaultError::InvalidToken { .. }));
    }

    #[test]
    fn garbled_token_is_invalid() {
        let err = parse("not-a-token", KEY).unwrap_err();
        assert!(matches!(err, VaultError::InvalidToken { .. }));
    }

    #[test]
    fn wrong_key_is_invalid() {
        let token = mint(42, TOKEN_TTL, KEY).unwrap();
        let err = parse(&token, b"10987654321098765432109876543210").unwrap_err();
        assert!(matches!(err, VaultError::InvalidToken { .. }));
    }
}
