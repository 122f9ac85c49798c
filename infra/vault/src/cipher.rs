//! Symmetric envelope encryption: `IV ∥ stream-encrypt(plaintext)`.
//!
//! This layer provides confidentiality only. Integrity is the payload's own
//! responsibility (its self-hash, verified after decrypt).

use crate::error::VaultError;
use aes::Aes256;
use aes::cipher::{AsyncStreamCipher, KeyIvInit};
use cfb_mode::{Decryptor, Encryptor};
use zeroize::Zeroize;

/// Length in bytes of the server-held symmetric key.
pub const KEY_LEN: usize = 32;
/// Length in bytes of the random initialization vector prefixed to every ciphertext.
pub const IV_LEN: usize = 16;

type Aes256CfbEncryptor = Encryptor<Aes256>;
type Aes256CfbDecryptor = Decryptor<Aes256>;

/// The 32-byte server-held key `K`, zeroized on drop.
pub struct EnvelopeKey([u8; KEY_LEN]);

impl EnvelopeKey {
    /// Builds a key from raw bytes, rejecting anything that isn't exactly [`KEY_LEN`] bytes.
    pub fn new(key: &[u8]) -> Result<Self, VaultError> {
        let bytes: [u8; KEY_LEN] = key.try_into().map_err(|_| VaultError::WrongKeyLength {
            message: format!("expected {KEY_LEN} bytes, got {}", key.len()).into(),
            context: None,
        })?;
        Ok(Self(bytes))
    }

    /// Encrypts `plaintext`, returning `IV ∥ ciphertext`. Each call draws a fresh random IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut iv = [0u8; IV_LEN];
        getrandom::fill(&mut iv).expect("OS randomness source unavailable");

        let mut body = plaintext.to_vec();
        Aes256CfbEncryptor::new((&self.0).into(), (&iv).into()).encrypt(&mut body);

        let mut out = Vec::with_capacity(IV_LEN + body.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&body);
        out
    }

    /// Splits the IV prefix and decrypts the remainder.
    ///
    /// # Errors
    /// Returns [`VaultError::CipherTooShort`] if `ciphertext` is shorter than [`IV_LEN`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, VaultError> {
        if ciphertext.len() < IV_LEN {
            return Err(VaultError::CipherTooShort {
                message: format!(
                    "ciphertext of {} bytes is shorter than the {IV_LEN}-byte IV",
                    ciphertext.len()
                )
                .into(),
                context: None,
            });
        }

        let (iv, body) = ciphertext.split_at(IV_LEN);
        let mut body = body.to_vec();
        Aes256CfbDecryptor::new((&self.0).into(), iv.into()).decrypt(&mut body);
        Ok(body)
    }
}

impl Drop for EnvelopeKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let key = EnvelopeKey::new(&[7u8; KEY_LEN]).unwrap();
        let plaintext = b"gophkeeper secret payload bytes";
        let ciphertext = key.encrypt(plaintext);
        assert_eq!(key.decrypt(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn rejects_short_ciphertext() {
        let key = EnvelopeKey::new(&[7u8; KEY_LEN]).unwrap();
        let err = key.decrypt(&[0u8; IV_LEN - 1]).unwrap_err();
        assert!(matches!(err, VaultError::CipherTooShort { .. }));
    }

    #[test]
    fn rejects_wrong_key_length() {
        let err = EnvelopeKey::new(&[0u8; KEY_LEN - 1]).unwrap_err();
        assert!(matches!(err, VaultError::WrongKeyLength { .. }));
    }

    #[test]
    fn distinct_ivs_yield_distinct_ciphertexts() {
        let key = EnvelopeKey::new(&[7u8; KEY_LEN]).unwrap();
        let a = key.encrypt(b"same plaintext");
        let b = key.encrypt(b"same plaintext");
        assert_ne!(a, b);
    }
}
