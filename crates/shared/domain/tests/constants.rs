use gophkeeper_domain::constants::{
    JWT_TOKEN_HEADER, MAX_MESSAGE_SIZE_BYTES, MAX_PAYLOAD_SIZE_BYTES, SERVER_KEY_LEN,
    TOKEN_TTL_SECONDS,
};

#[test]
fn constants_hold_the_protocol_invariants() {
    assert_eq!(SERVER_KEY_LEN, 32);
    assert_eq!(JWT_TOKEN_HEADER, "JWT_TOKEN");
    assert_eq!(TOKEN_TTL_SECONDS, 24 * 60 * 60);
    assert_eq!(MAX_MESSAGE_SIZE_BYTES, MAX_PAYLOAD_SIZE_BYTES + 1024);
}
