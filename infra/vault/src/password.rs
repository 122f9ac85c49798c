//! Adaptive password hashing (registration) and constant-time verification (login).

use crate::error::VaultError;

/// Minimum bcrypt work factor accepted by [`hash`].
pub const MIN_COST: u32 = 12;

/// Hashes `password` with bcrypt at [`MIN_COST`].
///
/// # Errors
/// Returns [`VaultError::Hash`] if bcrypt fails (e.g. the password exceeds bcrypt's
/// internal length limit).
pub fn hash(password: &str) -> Result<String, VaultError> {
    bcrypt::hash(password, MIN_COST)
        .map_err(|e| VaultError::Hash { message: e.to_string().into(), context: None })
}

/// Verifies `password` against a previously stored bcrypt hash in constant time.
///
/// Any malformed stored hash is treated as a verification failure rather than a panic.
#[must_use]
pub fn verify(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let hashed = hash("s3cret").unwrap();
        assert!(verify("s3cret", &hashed));
        assert!(!verify("wrong", &hashed));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify("s3cret", "not-a-bcrypt-hash"));
    }
}
