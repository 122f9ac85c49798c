//! Cryptographic primitives for the secret vault: symmetric envelope encryption,
//! adaptive password hashing, and signed bearer tokens.
//!
//! ## Envelope format
//!
//! Encrypted payloads are a plain concatenation of a random IV and the stream-encrypted
//! plaintext:
//!
//! ```text
//! IV(16) ∥ stream-encrypt(plaintext)
//! ```
//!
//! This layer provides confidentiality only, not integrity — authenticity of a decrypted
//! payload is established by the payload's own self-hash, not by this envelope.
//!
//! ## Example
//!
//! ```rust
//! use gophkeeper_vault::EnvelopeKey;
//!
//! # fn main() -> Result<(), gophkeeper_vault::VaultError> {
//! let key = EnvelopeKey::new(&[0u8; 32])?;
//! let ciphertext = key.encrypt(b"plaintext payload bytes");
//! assert_eq!(key.decrypt(&ciphertext)?, b"plaintext payload bytes");
//! # Ok(())
//! # }
//! ```

mod cipher;
mod error;
mod password;
mod token;

pub use cipher::{EnvelopeKey, IV_LEN, KEY_LEN};
pub use error::{VaultError, VaultErrorExt};
pub use password::{MIN_COST, hash as hash_password, verify as verify_password};
pub use token::{TOKEN_TTL, mint as mint_token, parse as parse_token};
