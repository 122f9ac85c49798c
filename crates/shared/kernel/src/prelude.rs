//! Convenience re-exports for crates that consume the kernel's server plumbing.

#[cfg(feature = "api")]
pub use crate::server::state::{ApiState, ApiStateBuilder, ApiStateError};
