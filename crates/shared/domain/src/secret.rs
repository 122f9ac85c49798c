//! Secret payload kinds: typed values carried inside a secret, each with a self-integrity
//! hash computed at construction and checked on decode (§3, §4.2).
//!
//! Every kind is encoded on the wire independently via `postcard` — there is no enclosing
//! tagged union in the byte stream. The numeric [`SecretKind`] tag lives in the persisted
//! record (and on the RPC surface) instead, so decoding bytes produced for one kind under a
//! different kind's schema is meaningful: it either fails to parse structurally or parses
//! into a value whose hash does not match.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// The enumerated secret kinds. Any numeric tag outside this set is `InvalidSecret` at the
/// RPC boundary (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecretKind {
    Credentials = 1,
    Text = 2,
    Binary = 3,
    Card = 4,
}

impl SecretKind {
    /// Maps a persisted/RPC numeric tag back to a [`SecretKind`].
    #[must_use]
    pub const fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            1 => Some(Self::Credentials),
            2 => Some(Self::Text),
            3 => Some(Self::Binary),
            4 => Some(Self::Card),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Credentials => "credentials",
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Card => "card",
        };
        f.write_str(name)
    }
}

fn self_hash(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

/// Login/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    hash: String,
}

impl Credentials {
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        let login = login.into();
        let password = password.into();
        let hash = self_hash(&[login.as_bytes(), password.as_bytes()]);
        Self { login, password, hash }
    }

    #[must_use]
    pub fn valid(&self) -> bool {
        self.hash == self_hash(&[self.login.as_bytes(), self.password.as_bytes()])
    }
}

/// Free-form text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub data: String,
    hash: String,
}

impl Text {
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        let data = data.into();
        let hash = self_hash(&[data.as_bytes()]);
        Self { data, hash }
    }

    #[must_use]
    pub fn valid(&self) -> bool {
        self.hash == self_hash(&[self.data.as_bytes()])
    }
}

/// Opaque binary attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary {
    pub data: Vec<u8>,
    hash: String,
}

impl Binary {
    #[must_use]
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let hash = self_hash(&[data.as_slice()]);
        Self { data, hash }
    }

    #[must_use]
    pub fn valid(&self) -> bool {
        self.hash == self_hash(&[self.data.as_slice()])
    }
}

/// Bank-card record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub card_number: String,
    pub card_holder: String,
    pub valid_thru: String,
    pub cvv: String,
    hash: String,
}

impl Card {
    #[must_use]
    pub fn new(
        card_number: impl Into<String>,
        card_holder: impl Into<String>,
        valid_thru: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        let card_number = card_number.into();
        let card_holder = card_holder.into();
        let valid_thru = valid_thru.into();
        let cvv = cvv.into();
        let hash = self_hash(&[
            card_number.as_bytes(),
            card_holder.as_bytes(),
            valid_thru.as_bytes(),
            cvv.as_bytes(),
        ]);
        Self { card_number, card_holder, valid_thru, cvv, hash }
    }

    #[must_use]
    pub fn valid(&self) -> bool {
        self.hash
            == self_hash(&[
                self.card_number.as_bytes(),
                self.card_holder.as_bytes(),
                self.valid_thru.as_bytes(),
                self.cvv.as_bytes(),
            ])
    }
}

/// In-memory dispatch over the four payload kinds. The RPC layer uses this to move a decoded
/// payload around; the wire/ciphertext encoding of each variant is always the bare struct
/// (see the module docs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Credentials(Credentials),
    Text(Text),
    Binary(Binary),
    Card(Card),
}

/// Failure decoding a payload's bytes under a given [`SecretKind`].
#[derive(Debug, thiserror::Error)]
#[error("payload decode failed: {0}")]
pub struct PayloadDecodeError(#[from] postcard::Error);

impl Payload {
    #[must_use]
    pub const fn kind(&self) -> SecretKind {
        match self {
            Self::Credentials(_) => SecretKind::Credentials,
            Self::Text(_) => SecretKind::Text,
            Self::Binary(_) => SecretKind::Binary,
            Self::Card(_) => SecretKind::Card,
        }
    }

    /// Predicate: the payload's self-integrity hash matches its fields (§3).
    #[must_use]
    pub fn valid(&self) -> bool {
        match self {
            Self::Credentials(c) => c.valid(),
            Self::Text(t) => t.valid(),
            Self::Binary(b) => b.valid(),
            Self::Card(c) => c.valid(),
        }
    }

    /// Encodes the inner value with `postcard`, deterministically for equal inputs.
    ///
    /// # Errors
    /// Returns [`PayloadDecodeError`] if `postcard` fails to serialize (practically
    /// unreachable for these plain-data shapes).
    pub fn encode(&self) -> Result<Vec<u8>, PayloadDecodeError> {
        Ok(match self {
            Self::Credentials(c) => postcard::to_stdvec(c)?,
            Self::Text(t) => postcard::to_stdvec(t)?,
            Self::Binary(b) => postcard::to_stdvec(b)?,
            Self::Card(c) => postcard::to_stdvec(c)?,
        })
    }

    /// Decodes `bytes` as the given `kind`.
    ///
    /// # Errors
    /// Returns [`PayloadDecodeError`] if `bytes` do not structurally match the target kind's
    /// schema. A structural match under the *wrong* kind is still caught by [`Payload::valid`]
    /// failing on the decoded value.
    pub fn decode(kind: SecretKind, bytes: &[u8]) -> Result<Self, PayloadDecodeError> {
        Ok(match kind {
            SecretKind::Credentials => Self::Credentials(postcard::from_bytes(bytes)?),
            SecretKind::Text => Self::Text(postcard::from_bytes(bytes)?),
            SecretKind::Binary => Self::Binary(postcard::from_bytes(bytes)?),
            SecretKind::Card => Self::Card(postcard::from_bytes(bytes)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_round_trip_and_validate() {
        let original = Payload::Credentials(Credentials::new("bob", "p@ss"));
        let bytes = original.encode().unwrap();
        let decoded = Payload::decode(SecretKind::Credentials, &bytes).unwrap();
        assert_eq!(decoded, original);
        assert!(decoded.valid());
    }

    #[test]
    fn tampered_field_fails_hash_check() {
        let mut creds = Credentials::new("bob", "p@ss");
        creds.password = "hacked".to_owned();
        assert!(!creds.valid());
    }

    #[test]
    fn wrong_kind_decode_is_structural_failure_or_invalid_hash() {
        let card = Payload::Card(Card::new("4111111111111111", "Bob Bobson", "12/30", "123"));
        let bytes = card.encode().unwrap();

        match Payload::decode(SecretKind::Credentials, &bytes) {
            Err(_) => {}
            Ok(decoded) => assert!(!decoded.valid()),
        }
    }

    #[test]
    fn tag_round_trips() {
        for kind in [SecretKind::Credentials, SecretKind::Text, SecretKind::Binary, SecretKind::Card] {
            assert_eq!(SecretKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(SecretKind::from_tag(0), None);
        assert_eq!(SecretKind::from_tag(5), None);
    }
}
