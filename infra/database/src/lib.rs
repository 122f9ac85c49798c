//! # Database Infrastructure
//!
//! This crate provides a unified interface for initializing and managing [SurrealDB](https://surrealdb.com)
//! connections across the workspace, plus the repository operations the secrets and identity
//! slices are built on: two tables (`users`, `secrets`), a counter for monotonic integer ids,
//! and an optimistic-concurrency update path for secrets.
//!
//! ## Key Features
//! - **Engine Agnostic**: Supports `mem://`, `rocksdb://`, `ws://`, and `http://` via the `any` engine.
//! - **Resilient Connectivity**: Built-in retry logic for health checks during engine startup.
//! - **Builder Pattern**: Fluent API for configuring connections and authentication.
//!
//! ## Example
//!
//! ```rust
//! use gophkeeper_database::{Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("mem://")
//!         .session("gophkeeper", "core")
//!         .init()
//!         .await?;
//!
//!     let _alive = db.ping().await?;
//!
//!     Ok(())
//! }
//! ```

mod error;
mod schema;

pub use error::{DatabaseError, DatabaseErrorExt};
use error::is_unique_violation;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{info, instrument, warn};

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// `SurrealDB` client wrapper that provides thread-safety and contextual error handling.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

/// A fluent builder for configuring and establishing a `SurrealDB` connection.
///
/// This builder ensures that fundamental parameters like the connection URL,
/// namespace, and database name are provided upfront.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    auth: Option<(String, String)>,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the namespace and database name.
    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Adds root credentials to the connection.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Consumes the builder and attempts to establish a connection to the database.
    ///
    /// This method executes the full connection lifecycle, including engine initialization,
    /// health check retries with exponential backoff, authentication, session activation, and
    /// applying the table schema.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if required parameters are missing.
    /// * [`DatabaseError::Connection`] if the engine fails to start or remains unhealthy.
    /// * [`DatabaseError::Surreal`] if authentication, session activation, or schema setup fails.
    #[instrument(skip(self), fields(url = self.url, ns = self.ns, db = self.db))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;
        let ns = self.ns.ok_or(DatabaseError::Validation {
            message: "Namespace is required".into(),
            context: None,
        })?;
        let db = self.db.ok_or(DatabaseError::Validation {
            message: "Database is required".into(),
            context: None,
        })?;

        let instance = connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Initializing engine".into()),
        })?;

        // Connectivity & health check with retries.
        let mut delay = Duration::from_millis(500);
        for attempt in 1..=3 {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == 3 {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        if let Some((u, p)) = self.auth {
            instance.signin(Root { username: &u, password: &p }).await?;
        }

        instance.use_ns(&ns).use_db(&db).await?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        schema::apply(&instance).await?;
        info!("Database schema applied");

        Ok(Database { inner: Arc::new(DatabaseInner { instance, ns, db }) })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CounterValue {
    value: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserRow {
    user_id: i64,
    username: String,
    password: String,
}

/// A secret's name/kind/version tuple, as returned from [`Database::list_secrets`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretInfo {
    pub name: String,
    pub kind: i32,
    pub version: i64,
}

/// A full secret row, as returned from [`Database::get_secret`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    pub name: String,
    pub kind: i32,
    pub meta: String,
    pub version: i64,
    pub payload_ciphertext: Vec<u8>,
}

/// A new secret to persist via [`Database::create_secret`].
#[derive(Debug, Clone)]
pub struct NewSecret {
    pub name: String,
    pub kind: i32,
    pub meta: String,
    pub payload_ciphertext: Vec<u8>,
}

/// An in-place update to an existing secret, carrying the client's expected next version.
///
/// `replace_payload` mirrors the wire protocol's `update_payload` flag (§6): when `false`,
/// `payload_ciphertext` is ignored and only `meta`/`version` are written.
#[derive(Debug, Clone)]
pub struct SecretUpdate {
    pub meta: String,
    pub version: i64,
    pub replace_payload: bool,
    pub payload_ciphertext: Vec<u8>,
}

impl Database {
    /// Inserts a new user, assigning the next monotonic integer id.
    ///
    /// # Errors
    /// [`DatabaseError::UserExists`] if `username` is already taken.
    #[instrument(skip(self, password_hash))]
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, DatabaseError> {
        let mut counter_response = self
            .inner
            .instance
            .query("UPSERT counter:users SET value = (value ?? 0) + 1 RETURN AFTER")
            .await?;
        let counter: Option<CounterValue> = counter_response.take(0)?;
        let user_id = counter
            .ok_or_else(|| DatabaseError::Internal {
                message: "counter:users did not return a value".into(),
                context: None,
            })?
            .value;

        let response = self
            .inner
            .instance
            .query(
                "CREATE type::thing('users', $user_id) CONTENT {
                    user_id: $user_id, username: $username, password: $password
                }",
            )
            .bind(("user_id", user_id))
            .bind(("username", username.to_owned()))
            .bind(("password", password_hash.to_owned()))
            .await?;

        // The unique-index violation surfaces as a statement-level error inside the
        // response, not as an `Err` from `.await` itself — it is only visible once we
        // call `.check()` here.
        response.check().map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::UserExists {
                    message: format!("username {username:?} is already taken").into(),
                    context: None,
                }
            } else {
                e.into()
            }
        })?;

        Ok(user_id)
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    /// [`DatabaseError::UserNotFound`] if no such user exists.
    #[instrument(skip(self))]
    pub async fn find_user(&self, username: &str) -> Result<(i64, String), DatabaseError> {
        let mut response = self
            .inner
            .instance
            .query("SELECT * FROM ONLY users WHERE username = $username LIMIT 1")
            .bind(("username", username.to_owned()))
            .await?;

        let row: Option<UserRow> = response.take(0)?;
        let row = row.ok_or_else(|| DatabaseError::UserNotFound {
            message: format!("no user {username:?}").into(),
            context: None,
        })?;

        Ok((row.user_id, row.password))
    }

    /// Inserts a new secret for `user_id`.
    ///
    /// # Errors
    /// [`DatabaseError::SecretExists`] if `(user_id, name)` is already taken.
    #[instrument(skip(self, secret), fields(name = %secret.name))]
    pub async fn create_secret(
        &self,
        user_id: i64,
        secret: NewSecret,
    ) -> Result<(), DatabaseError> {
        let response = self
            .inner
            .instance
            .query(
                "CREATE type::thing('secrets', [$user_id, $name]) CONTENT {
                    user_id: $user_id, kind: $kind, name: $name, meta: $meta,
                    version: 1, payload_ciphertext: $payload_ciphertext
                }",
            )
            .bind(("user_id", user_id))
            .bind(("kind", secret.kind))
            .bind(("name", secret.name.clone()))
            .bind(("meta", secret.meta))
            .bind(("payload_ciphertext", secret.payload_ciphertext))
            .await?;

        // `secrets` has no separate `UNIQUE` index — the composite record id IS the
        // uniqueness constraint — so the conflict shows up as a record-already-exists
        // statement error here, not as an `Err` from `.await`.
        response.check().map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::SecretExists {
                    message: format!("secret {:?} already exists", secret.name).into(),
                    context: None,
                }
            } else {
                e.into()
            }
        })?;

        Ok(())
    }

    /// Reads a secret for `user_id`.
    ///
    /// # Errors
    /// [`DatabaseError::SecretNotFound`] if no such secret exists.
    #[instrument(skip(self))]
    pub async fn get_secret(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<SecretRecord, DatabaseError> {
        let mut response = self
            .inner
            .instance
            .query("SELECT name, kind, meta, version, payload_ciphertext FROM ONLY type::thing('secrets', [$user_id, $name])")
            .bind(("user_id", user_id))
            .bind(("name", name.to_owned()))
            .await?;

        let row: Option<SecretRecord> = response.take(0)?;
        row.ok_or_else(|| DatabaseError::SecretNotFound {
            message: format!("no secret {name:?}").into(),
            context: None,
        })
    }

    /// Lists a user's secrets, ordered by name ascending (collation-dependent; see design notes).
    #[instrument(skip(self))]
    pub async fn list_secrets(&self, user_id: i64) -> Result<Vec<SecretInfo>, DatabaseError> {
        let mut response = self
            .inner
            .instance
            .query("SELECT name, kind, version FROM secrets WHERE user_id = $user_id ORDER BY name ASC")
            .bind(("user_id", user_id))
            .await?;

        let rows: Vec<SecretInfo> = response.take(0)?;
        Ok(rows)
    }

    /// Deletes a secret. Idempotent: deleting an absent secret is not an error.
    #[instrument(skip(self))]
    pub async fn delete_secret(&self, user_id: i64, name: &str) -> Result<(), DatabaseError> {
        self.inner
            .instance
            .query("DELETE type::thing('secrets', [$user_id, $name])")
            .bind(("user_id", user_id))
            .bind(("name", name.to_owned()))
            .await?
            .check()?;
        Ok(())
    }

    /// Applies an optimistic-concurrency update to a secret (§4.3).
    ///
    /// The locked read, version comparison, and conditional write are sent as a single
    /// multi-statement `BEGIN...COMMIT TRANSACTION` query — one `.query()` call, the same
    /// transaction idiom `migrations.rs` uses for its own schema changes. Splitting
    /// this across several independent `.query()` calls would let each statement auto-commit
    /// on its own, reopening the race between the read and the write; `SurrealDB` scopes a
    /// transaction to a single request, not to a sequence of them. The version decision
    /// itself is made inside the query via `THROW`, so the comparison and the write are
    /// atomic with respect to concurrent updaters of the same `(user_id, name)`.
    ///
    /// # Errors
    /// - [`DatabaseError::SecretNotFound`] if the secret does not exist.
    /// - [`DatabaseError::SecretOutdated`] if `update.version <= current version`.
    /// - [`DatabaseError::SecretWrongVersion`] if `update.version` skips ahead by more than one.
    #[instrument(skip(self, update), fields(name = %name))]
    pub async fn update_secret(
        &self,
        user_id: i64,
        name: &str,
        update: SecretUpdate,
    ) -> Result<i64, DatabaseError> {
        let set_payload =
            if update.replace_payload { ", payload_ciphertext = $payload_ciphertext" } else { "" };

        let query = format!(
            "BEGIN TRANSACTION;
             LET $current = (SELECT version FROM ONLY type::thing('secrets', [$user_id, $name]));
             IF $current = NONE THEN
                 THROW 'secret_not_found'
             ELSE IF $version <= $current.version THEN
                 THROW 'secret_outdated'
             ELSE IF $version - $current.version > 1 THEN
                 THROW 'secret_wrong_version'
             ELSE
                 UPDATE type::thing('secrets', [$user_id, $name]) SET meta = $meta, version = $version{set_payload}
             END;
             COMMIT TRANSACTION;"
        );

        let mut request = self
            .inner
            .instance
            .query(&query)
            .bind(("user_id", user_id))
            .bind(("name", name.to_owned()))
            .bind(("meta", update.meta))
            .bind(("version", update.version));

        if update.replace_payload {
            request = request.bind(("payload_ciphertext", update.payload_ciphertext));
        }

        let response = request.await?;
        response.check().map_err(|e| classify_update_error(e, name, update.version))?;

        Ok(update.version)
    }

    /// Liveness probe.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<bool, DatabaseError> {
        Ok(self.inner.instance.health().await.is_ok())
    }
}

/// Maps the `THROW`n sentinel from [`Database::update_secret`]'s transaction onto the
/// matching typed error; anything else is an unrelated `SurrealDB` failure.
fn classify_update_error(err: surrealdb::Error, name: &str, requested_version: i64) -> DatabaseError {
    let message = err.to_string();
    if message.contains("secret_not_found") {
        DatabaseError::SecretNotFound { message: format!("no secret {name:?}").into(), context: None }
    } else if message.contains("secret_outdated") {
        DatabaseError::SecretOutdated {
            message: format!(
                "update version {requested_version} is not greater than the current version"
            )
            .into(),
            context: None,
        }
    } else if message.contains("secret_wrong_version") {
        DatabaseError::SecretWrongVersion {
            message: format!("update version {requested_version} skips ahead of the current version")
                .into(),
            context: None,
        }
    } else {
        err.into()
    }
}
