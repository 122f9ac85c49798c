use fixtures::TEST_KEY;
use gophkeeper_vault::EnvelopeKey;
use proptest::prelude::*;

mod fixtures;

proptest! {
    #[test]
    fn envelope_roundtrips_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let key = EnvelopeKey::new(TEST_KEY).unwrap();
        let ciphertext = key.encrypt(&data);
        let decrypted = key.decrypt(&ciphertext).unwrap();
        prop_assert_eq!(data, decrypted);
    }

    #[test]
    fn short_ciphertexts_always_reject(len in 0usize..gophkeeper_vault::IV_LEN) {
        let key = EnvelopeKey::new(TEST_KEY).unwrap();
        let short = vec![0u8; len];
        prop_assert!(matches!(key.decrypt(&short), Err(gophkeeper_vault::VaultError::CipherTooShort { .. })));
    }
}
