//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `sha2`, `postcard`).
//! Keep it lean: no network or database I/O—just data, encoding, and the self-integrity hashing
//! that secrets rely on.

pub mod config;
pub mod constants;
pub mod registry;
pub mod secret;
