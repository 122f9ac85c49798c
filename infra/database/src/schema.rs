//! Inline schema setup. No external migration tooling: this is a two-table store
//! (users, secrets) plus an atomic id counter, so a single idempotent `DEFINE ... OVERWRITE`
//! script run on every startup is simpler than a migration ledger.

use crate::error::{DatabaseError, DatabaseErrorExt};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

const SCHEMA: &str = "
DEFINE TABLE users SCHEMAFULL OVERWRITE;
DEFINE FIELD user_id ON users TYPE int OVERWRITE;
DEFINE FIELD username ON users TYPE string OVERWRITE;
DEFINE FIELD password ON users TYPE string OVERWRITE;
DEFINE FIELD created_at ON users TYPE datetime DEFAULT time::now() OVERWRITE;
DEFINE INDEX users_username_unique ON users FIELDS username UNIQUE OVERWRITE;
DEFINE INDEX users_user_id_unique ON users FIELDS user_id UNIQUE OVERWRITE;

DEFINE TABLE secrets SCHEMAFULL OVERWRITE;
DEFINE FIELD user_id ON secrets TYPE int OVERWRITE;
DEFINE FIELD kind ON secrets TYPE int OVERWRITE;
DEFINE FIELD name ON secrets TYPE string OVERWRITE;
DEFINE FIELD meta ON secrets TYPE string OVERWRITE;
DEFINE FIELD version ON secrets TYPE int OVERWRITE;
DEFINE FIELD payload_ciphertext ON secrets TYPE bytes OVERWRITE;
DEFINE INDEX secrets_user_id ON secrets FIELDS user_id OVERWRITE;

DEFINE TABLE counter SCHEMAFULL OVERWRITE;
DEFINE FIELD value ON counter TYPE int OVERWRITE;
";

pub(crate) async fn apply(db: &Surreal<Any>) -> Result<(), DatabaseError> {
    db.query(SCHEMA).await.context("Applying schema")?.check()?;
    Ok(())
}
