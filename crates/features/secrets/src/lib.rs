//! Secrets feature slice: encrypted CRUD over a user's typed secrets, plus the liveness
//! probe (§4.3, §4.5). Every route this slice exposes is protected; see `router`.

mod error;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub mod router;

pub use error::{SecretsError, SecretsErrorExt};

use gophkeeper_kernel::domain::registry::InitializedSlice;

/// Secrets feature state.
///
/// Stateless, like identity — all durable state lives in the persistence layer (C3).
#[gophkeeper_derive::gophkeeper_slice]
pub struct Secrets {}

/// Initializes the secrets feature slice.
///
/// # Errors
/// Currently infallible; kept fallible to match the other feature slices' `init` signature.
#[cfg(feature = "server")]
pub fn init() -> Result<InitializedSlice, SecretsError> {
    tracing::info!("secrets slice initialized");
    let slice = Secrets::new(SecretsInner {});
    Ok(InitializedSlice::new(slice))
}
