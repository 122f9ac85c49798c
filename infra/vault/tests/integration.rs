pub mod fixtures;

use fixtures::{TEST_KEY, setup_envelope};
use gophkeeper_vault::{TOKEN_TTL, VaultError, hash_password, mint_token, parse_token, verify_password};
use std::time::Duration;

#[test]
fn envelope_round_trips_and_distinguishes_keys() {
    let envelope = setup_envelope();
    let plaintext = b"gophkeeper integration payload";

    let ciphertext = envelope.encrypt(plaintext);
    assert_eq!(envelope.decrypt(&ciphertext).unwrap(), plaintext);

    let other_key = b"10987654321098765432109876543210";
    let other = gophkeeper_vault::EnvelopeKey::new(other_key).unwrap();
    assert_ne!(other.decrypt(&ciphertext).unwrap_or_default(), plaintext);
}

#[test]
fn password_hash_and_verify_round_trip() {
    let hashed = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password("correct horse battery staple", &hashed));
    assert!(!verify_password("wrong password", &hashed));
}

#[test]
fn token_mint_and_parse_round_trip_and_expire() {
    let token = mint_token(7, TOKEN_TTL, TEST_KEY).unwrap();
    assert_eq!(parse_token(&token, TEST_KEY).unwrap(), 7);

    let expired = mint_token(7, Duration::from_nanos(1), TEST_KEY).unwrap();
    std::thread::sleep(Duration::from_millis(1100));
    assert!(matches!(parse_token(&expired, TEST_KEY), Err(VaultError::InvalidToken { .. })));
}

#[test]
fn end_to_end_secret_envelope_under_a_minted_identity() {
    let envelope = setup_envelope();
    let token = mint_token(42, TOKEN_TTL, TEST_KEY).unwrap();
    let user_id = parse_token(&token, TEST_KEY).unwrap();

    let payload = format!("secret belonging to user {user_id}");
    let ciphertext = envelope.encrypt(payload.as_bytes());
    assert_eq!(envelope.decrypt(&ciphertext).unwrap(), payload.as_bytes());
}
