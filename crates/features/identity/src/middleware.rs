//! The bearer-token auth gate (§4.4).
//!
//! Applied by the binary composing this slice's routes with the secrets slice's protected
//! routes — this crate only supplies the layer, not the decision of which routes need it.

use crate::error::IdentityError;
use axum::extract::{Request, State};
use axum::http::HeaderName;
use axum::middleware::Next;
use axum::response::Response;
use gophkeeper_domain::constants::JWT_TOKEN_HEADER;
use gophkeeper_kernel::prelude::ApiState;

/// The numeric user id resolved from a validated bearer token, attached to the request
/// extensions under this type. Protected handlers must read the principal from here, never
/// from request-body fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

fn header_name() -> HeaderName {
    HeaderName::from_bytes(JWT_TOKEN_HEADER.as_bytes())
        .expect("JWT_TOKEN_HEADER is a valid header name")
}

/// Extracts and validates the `JWT_TOKEN` header, rejecting absent, duplicated, or invalid
/// tokens uniformly as [`IdentityError::InvalidToken`], then attaches the resolved [`UserId`].
pub async fn require_auth(
    State(state): State<ApiState>,
    mut request: Request,
    next: Next,
) -> Result<Response, IdentityError> {
    let header = header_name();
    let mut values = request.headers().get_all(&header).iter();

    let Some(token) = values.next() else {
        return Err(missing_or_duplicate());
    };
    if values.next().is_some() {
        return Err(missing_or_duplicate());
    }

    let token = token
        .to_str()
        .map_err(|_| IdentityError::InvalidToken { message: "JWT_TOKEN header is not valid UTF-8".into(), context: None })?;

    let key = state.config.security.server_key.as_bytes();
    let user_id = gophkeeper_vault::parse_token(token, key)?;

    request.extensions_mut().insert(UserId(user_id));
    Ok(next.run(request).await)
}

fn missing_or_duplicate() -> IdentityError {
    IdentityError::InvalidToken {
        message: "JWT_TOKEN header must be present exactly once".into(),
        context: None,
    }
}
