//! Protocol-wide constants shared by the identity and secrets feature slices.

/// Upper bound on a secret's raw, pre-encryption payload size.
///
/// Chosen to comfortably fit small binary attachments (a handful of megabytes)
/// while bounding per-request memory use.
pub const MAX_PAYLOAD_SIZE_BYTES: usize = 4 * 1024 * 1024;

/// Message size cap applied to both send and receive directions, accommodating the
/// envelope (IV prefix) plus framing overhead on top of [`MAX_PAYLOAD_SIZE_BYTES`].
pub const MAX_MESSAGE_SIZE_BYTES: usize = MAX_PAYLOAD_SIZE_BYTES + 1024;

/// Lifetime of a minted bearer token.
pub const TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Request header carrying the bearer token on protected calls.
pub const JWT_TOKEN_HEADER: &str = "JWT_TOKEN";

/// Exact byte length required of the server-held symmetric key `K`.
pub const SERVER_KEY_LEN: usize = 32;

/// `OpenAPI`/log tag for process-level (not business) endpoints.
pub const SYSTEM_TAG: &str = "System";
