//! Identity feature slice: user registration, login, and the bearer-token auth gate (§4.4, §4.5).

mod error;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod router;

pub use error::{IdentityError, IdentityErrorExt};
#[cfg(feature = "server")]
pub use middleware::UserId;

use gophkeeper_kernel::domain::registry::InitializedSlice;

/// Identity feature state.
///
/// Stateless for now — it exists so identity participates in the same registry/lifecycle
/// machinery as every other feature slice, and has somewhere to grow into (e.g. a login
/// rate limiter) without changing the registration call site.
#[gophkeeper_derive::gophkeeper_slice]
pub struct Identity {}

/// Initializes the identity feature slice.
///
/// # Errors
/// Currently infallible; kept fallible to match the other feature slices' `init` signature.
#[cfg(feature = "server")]
pub fn init() -> Result<InitializedSlice, IdentityError> {
    tracing::info!("identity slice initialized");
    let slice = Identity::new(IdentityInner {});
    Ok(InitializedSlice::new(slice))
}
