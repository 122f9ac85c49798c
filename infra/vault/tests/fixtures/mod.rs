use gophkeeper_vault::{EnvelopeKey, KEY_LEN};

/// 32-byte key used across the vault integration tests.
pub const TEST_KEY: &[u8; KEY_LEN] = b"01234567890123456789012345678901";

/// Builds an [`EnvelopeKey`] from [`TEST_KEY`].
///
/// # Panics
/// Panics if key construction fails (it can't, given a fixed 32-byte key).
#[must_use]
pub fn setup_envelope() -> EnvelopeKey {
    EnvelopeKey::new(TEST_KEY).expect("fixed 32-byte key")
}
