//! Facade crate for `GophKeeper` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature-slice initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.

pub use gophkeeper_database as database;
pub use gophkeeper_domain as domain;
pub use gophkeeper_kernel as kernel;
pub use gophkeeper_vault as vault;

#[cfg(feature = "server")]
pub use gophkeeper_identity as identity;
#[cfg(feature = "server")]
pub use gophkeeper_secrets as secrets;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use gophkeeper_identity::router::identity_router;
        pub use gophkeeper_kernel::server::router::system_router;
        pub use gophkeeper_secrets::router::secrets_router;
    }
}

use gophkeeper_database::Database;
use gophkeeper_domain::config::ApiConfig;
use gophkeeper_domain::registry::InitializedSlice;

/// Initializes every feature slice for server mode.
///
/// # Errors
/// Returns an error if any feature slice fails to initialize.
#[cfg(feature = "server")]
pub fn init(
    _config: &ApiConfig,
    _database: &Database,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error>> {
    Ok(vec![identity::init()?, secrets::init()?])
}
