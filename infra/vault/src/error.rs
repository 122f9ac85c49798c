//! # Vault Errors
//!
//! This module defines the [`VaultError`] enum used throughout the vault crate
//! for reporting cryptographic and token failures.

use std::borrow::Cow;

/// A specialized [`VaultError`] enum for vault-related failures.
#[gophkeeper_derive::gophkeeper_error]
pub enum VaultError {
    /// Ciphertext shorter than the envelope's IV prefix.
    #[error("ciphertext too short{}: {message}", format_context(.context))]
    CipherTooShort { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Key supplied to the envelope is not exactly [`crate::cipher::KEY_LEN`] bytes.
    #[error("wrong key length{}: {message}", format_context(.context))]
    WrongKeyLength { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Password hashing failed.
    #[error("password hashing error{}: {message}", format_context(.context))]
    Hash { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Signing or encoding a bearer token failed.
    #[error("token error{}: {source}", format_context(.context))]
    Token {
        #[source]
        source: jsonwebtoken::errors::Error,
        context: Option<Cow<'static, str>>,
    },

    /// A token is missing, malformed, signed with the wrong algorithm, or expired.
    #[error("invalid token{}: {message}", format_context(.context))]
    InvalidToken { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
