use std::borrow::Cow;

use gophkeeper_database::DatabaseError;
use gophkeeper_vault::VaultError;

/// A specialized [`SecretsError`] enum of this crate.
///
/// Mirrors the secret-service slice of the error taxonomy. `SecretWrongVersion` from the
/// persistence layer folds into `InvalidSecret` here — both are "the client sent a bad
/// argument" from the RPC surface's point of view, whereas `SecretOutdated` gets its own
/// precondition-failure mapping since retrying with a fresh read is the expected recovery.
#[gophkeeper_derive::gophkeeper_error]
pub enum SecretsError {
    /// Unknown kind tag, empty name, or an update that skipped versions.
    #[error("Invalid secret{}: {message}", format_context(.context))]
    InvalidSecret { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Duplicate `(user, name)`.
    #[error("Secret already exists{}: {message}", format_context(.context))]
    SecretExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No such secret for this user.
    #[error("Secret not found{}: {message}", format_context(.context))]
    SecretNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Update's version was not greater than the persisted version.
    #[error("Secret update is outdated{}: {message}", format_context(.context))]
    SecretOutdated { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Raw payload exceeds the configured size cap.
    #[error("Payload too large{}: {message}", format_context(.context))]
    PayloadTooLarge { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// List is empty (§9 Open Question: kept as the documented reference behavior).
    #[error("No secrets{}: {message}", format_context(.context))]
    NoSecrets { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Persistence/ping failure.
    #[error("Storage unavailable{}: {message}", format_context(.context))]
    StorageUnavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback: encrypt/decrypt failure, token mint failure, or any DB error
    /// unrelated to a known constraint.
    #[error("Internal secrets error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<DatabaseError> for SecretsError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::SecretExists { message, context } => {
                Self::SecretExists { message, context }
            }
            DatabaseError::SecretNotFound { message, context } => {
                Self::SecretNotFound { message, context }
            }
            DatabaseError::SecretOutdated { message, context } => {
                Self::SecretOutdated { message, context }
            }
            DatabaseError::SecretWrongVersion { message, context } => {
                Self::InvalidSecret { message, context }
            }
            other => Self::Internal { message: other.to_string().into(), context: None },
        }
    }
}

impl From<VaultError> for SecretsError {
    fn from(err: VaultError) -> Self {
        Self::Internal { message: err.to_string().into(), context: None }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::SecretsError;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    #[derive(Serialize)]
    struct ErrorBody {
        error: String,
    }

    impl IntoResponse for SecretsError {
        fn into_response(self) -> Response {
            let status = match &self {
                Self::InvalidSecret { .. } => StatusCode::BAD_REQUEST,
                Self::SecretExists { .. } => StatusCode::CONFLICT,
                Self::SecretNotFound { .. } | Self::NoSecrets { .. } => StatusCode::NOT_FOUND,
                Self::SecretOutdated { .. } => StatusCode::PRECONDITION_FAILED,
                Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                Self::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };

            if matches!(self, Self::Internal { .. } | Self::StorageUnavailable { .. }) {
                tracing::error!(error = %self, "secrets request failed");
            }

            (status, Json(ErrorBody { error: self.to_string() })).into_response()
        }
    }
}
