use std::borrow::Cow;

use gophkeeper_database::DatabaseError;
use gophkeeper_vault::VaultError;

/// A specialized [`IdentityError`] enum of this crate.
///
/// Variants line up with the identity-facing slice of the error taxonomy: empty
/// credentials, duplicate/unknown users, a wrong password, and an invalid bearer token,
/// plus an `Internal` catch-all for persistence/crypto failures the caller can't act on.
#[gophkeeper_derive::gophkeeper_error]
pub enum IdentityError {
    /// Empty login or password on registration.
    #[error("Invalid credentials{}: {message}", format_context(.context))]
    InvalidCredentials { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Username already taken.
    #[error("User already exists{}: {message}", format_context(.context))]
    UserExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No user row for the given login.
    #[error("User not found{}: {message}", format_context(.context))]
    UserNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Password did not match the stored hash.
    #[error("Wrong password{}: {message}", format_context(.context))]
    WrongPassword { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Bearer token missing, duplicated, malformed, or expired.
    #[error("Invalid token{}: {message}", format_context(.context))]
    InvalidToken { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal identity error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

// `DatabaseError` and `VaultError` each carry many variants this slice has no specific
// recovery for; only the ones identity handlers branch on get their own `IdentityError`
// variant, everything else collapses to `Internal`. The derive macro's generated `From`
// impls are 1:1 newtype wrappers and can't express this fan-in, so these are hand-written.
impl From<DatabaseError> for IdentityError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UserExists { message, context } => {
                Self::UserExists { message, context }
            }
            DatabaseError::UserNotFound { message, context } => {
                Self::UserNotFound { message, context }
            }
            other => Self::Internal { message: other.to_string().into(), context: None },
        }
    }
}

impl From<VaultError> for IdentityError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::InvalidToken { message, context } => {
                Self::InvalidToken { message, context }
            }
            other => Self::Internal { message: other.to_string().into(), context: None },
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::IdentityError;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    #[derive(Serialize)]
    struct ErrorBody {
        error: String,
    }

    impl IntoResponse for IdentityError {
        fn into_response(self) -> Response {
            let status = match &self {
                Self::InvalidCredentials { .. } => StatusCode::BAD_REQUEST,
                Self::UserExists { .. } => StatusCode::CONFLICT,
                Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
                Self::WrongPassword { .. } => StatusCode::FORBIDDEN,
                Self::InvalidToken { .. } => StatusCode::FORBIDDEN,
                Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };

            if matches!(self, Self::Internal { .. }) {
                tracing::error!(error = %self, "identity request failed");
            }

            (status, Json(ErrorBody { error: self.to_string() })).into_response()
        }
    }
}
