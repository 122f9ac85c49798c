use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
///
/// Variants map onto the persistence-layer error taxonomy: a handful of conditions the
/// secrets and identity slices recover from by name (`UserExists`, `SecretOutdated`, ...),
/// and an `Internal` catch-all for everything else.
#[gophkeeper_derive::gophkeeper_error]
pub enum DatabaseError {
    /// Builder was missing a required parameter.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Username already taken (unique violation on `users.username`).
    #[error("User already exists{}: {message}", format_context(.context))]
    UserExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No user row for the given login.
    #[error("User not found{}: {message}", format_context(.context))]
    UserNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A secret already exists for `(user_id, name)`.
    #[error("Secret already exists{}: {message}", format_context(.context))]
    SecretExists { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No secret row for `(user_id, name)`.
    #[error("Secret not found{}: {message}", format_context(.context))]
    SecretNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Update's version was not greater than the persisted version.
    #[error("Secret update is outdated{}: {message}", format_context(.context))]
    SecretOutdated { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Update's version skipped ahead of the persisted version by more than one.
    #[error("Secret update has the wrong version{}: {message}", format_context(.context))]
    SecretWrongVersion { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// `SurrealDB`'s error enum doesn't expose a stable "unique index violation" variant we can
/// match on across engine versions; we key off the message text instead. This covers both a
/// `DEFINE INDEX ... UNIQUE` violation ("already contains"/"unique") and a record-id conflict
/// ("already exists"), since `secrets` relies on its composite record id for uniqueness rather
/// than a separate index.
pub(crate) fn is_unique_violation(err: &surrealdb::Error) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("already contains")
        || message.contains("unique")
        || message.contains("already exists")
}
