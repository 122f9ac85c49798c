//! Secret CRUD handlers (§4.5). Every route here is protected: the user id must already be
//! attached to the request by the identity slice's auth gate before these run.

use crate::error::SecretsError;
use axum::Json;
use axum::extract::{Extension, Path, State};
use gophkeeper_database::{NewSecret, SecretUpdate as SecretUpdateRow};
use gophkeeper_derive::{api_handler, api_model};
use gophkeeper_domain::constants::MAX_PAYLOAD_SIZE_BYTES;
use gophkeeper_domain::secret::SecretKind;
use gophkeeper_identity::UserId;
use gophkeeper_kernel::prelude::ApiState;
use gophkeeper_vault::EnvelopeKey;

const SECRETS_TAG: &str = "Secrets";

#[api_model]
pub struct SecretInfoResponse {
    name: String,
    kind: i32,
    version: i64,
}

#[api_model]
pub struct SecretListResponse {
    items: Vec<SecretInfoResponse>,
}

#[api_model]
pub struct SecretResponse {
    name: String,
    kind: i32,
    meta: String,
    version: i64,
    payload_raw: Vec<u8>,
}

#[api_model]
pub struct CreateSecretRequest {
    name: String,
    kind: i32,
    meta: String,
    payload_raw: Vec<u8>,
}

#[api_model]
pub struct UpdateSecretRequest {
    meta: String,
    version: i64,
    update_payload: bool,
    payload_raw: Vec<u8>,
}

fn envelope_key(state: &ApiState) -> Result<EnvelopeKey, SecretsError> {
    Ok(EnvelopeKey::new(state.config.security.server_key.as_bytes())?)
}

#[api_handler(
    get,
    path = "/secrets",
    responses((status = OK, description = "List owned secrets", body = SecretListResponse)),
    tag = SECRETS_TAG,
)]
pub(crate) async fn list_secrets(
    State(state): State<ApiState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> Result<Json<SecretListResponse>, SecretsError> {
    let items = state.database.list_secrets(user_id).await?;

    if items.is_empty() {
        return Err(SecretsError::NoSecrets {
            message: "this user has no secrets".into(),
            context: None,
        });
    }

    Ok(Json(SecretListResponse {
        items: items
            .into_iter()
            .map(|info| SecretInfoResponse { name: info.name, kind: info.kind, version: info.version })
            .collect(),
    }))
}

#[api_handler(
    get,
    path = "/secrets/{name}",
    params(("name" = String, Path, description = "Secret name")),
    responses((status = OK, description = "Fetch a secret", body = SecretResponse)),
    tag = SECRETS_TAG,
)]
pub(crate) async fn get_secret(
    State(state): State<ApiState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(name): Path<String>,
) -> Result<Json<SecretResponse>, SecretsError> {
    let record = state.database.get_secret(user_id, &name).await?;
    let key = envelope_key(&state)?;
    let payload_raw = key.decrypt(&record.payload_ciphertext)?;

    Ok(Json(SecretResponse {
        name: record.name,
        kind: record.kind,
        meta: record.meta,
        version: record.version,
        payload_raw,
    }))
}

#[api_handler(
    post,
    path = "/secrets",
    request_body = CreateSecretRequest,
    responses((status = OK, description = "Create a secret")),
    tag = SECRETS_TAG,
)]
pub(crate) async fn create_secret(
    State(state): State<ApiState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Json(body): Json<CreateSecretRequest>,
) -> Result<(), SecretsError> {
    if body.name.is_empty() || SecretKind::from_tag(body.kind).is_none() {
        return Err(SecretsError::InvalidSecret {
            message: "name must be non-empty and kind must be a known tag".into(),
            context: None,
        });
    }
    reject_oversize(&body.payload_raw)?;

    let key = envelope_key(&state)?;
    let payload_ciphertext = key.encrypt(&body.payload_raw);

    state
        .database
        .create_secret(
            user_id,
            NewSecret { name: body.name, kind: body.kind, meta: body.meta, payload_ciphertext },
        )
        .await?;

    Ok(())
}

#[api_handler(
    put,
    path = "/secrets/{name}",
    params(("name" = String, Path, description = "Secret name")),
    request_body = UpdateSecretRequest,
    responses((status = OK, description = "Update a secret")),
    tag = SECRETS_TAG,
)]
pub(crate) async fn update_secret(
    State(state): State<ApiState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(name): Path<String>,
    Json(body): Json<UpdateSecretRequest>,
) -> Result<(), SecretsError> {
    let payload_ciphertext = if body.update_payload {
        reject_oversize(&body.payload_raw)?;
        let key = envelope_key(&state)?;
        key.encrypt(&body.payload_raw)
    } else {
        Vec::new()
    };

    state
        .database
        .update_secret(
            user_id,
            &name,
            SecretUpdateRow {
                meta: body.meta,
                version: body.version,
                replace_payload: body.update_payload,
                payload_ciphertext,
            },
        )
        .await?;

    Ok(())
}

#[api_handler(
    delete,
    path = "/secrets/{name}",
    params(("name" = String, Path, description = "Secret name")),
    responses((status = OK, description = "Delete a secret")),
    tag = SECRETS_TAG,
)]
pub(crate) async fn delete_secret(
    State(state): State<ApiState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(name): Path<String>,
) -> Result<(), SecretsError> {
    state.database.delete_secret(user_id, &name).await?;
    Ok(())
}

#[api_handler(
    get,
    path = "/secrets/ping",
    responses((status = OK, description = "Liveness probe")),
    tag = SECRETS_TAG,
)]
pub(crate) async fn ping(
    State(state): State<ApiState>,
    Extension(_user_id): Extension<UserId>,
) -> Result<(), SecretsError> {
    let alive = state.database.ping().await.unwrap_or(false);
    if alive {
        Ok(())
    } else {
        Err(SecretsError::StorageUnavailable {
            message: "storage ping failed".into(),
            context: None,
        })
    }
}

fn reject_oversize(payload_raw: &[u8]) -> Result<(), SecretsError> {
    if payload_raw.len() > MAX_PAYLOAD_SIZE_BYTES {
        return Err(SecretsError::PayloadTooLarge {
            message: format!("payload of {} bytes exceeds the cap", payload_raw.len()).into(),
            context: None,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gophkeeper_database::Database;
    use gophkeeper_domain::config::ApiConfig;
    use gophkeeper_domain::secret::{Credentials, Payload};

    async fn state(ns: &str) -> ApiState {
        let database = Database::builder().url("mem://").session(ns, "core").init().await.unwrap();
        ApiState::builder().config(ApiConfig::default()).db(database).build().unwrap()
    }

    fn user(id: i64) -> Extension<UserId> {
        Extension(UserId(id))
    }

    #[tokio::test]
    async fn secret_crud_lifecycle_round_trips_plaintext() {
        let state = state("secrets_crud").await;
        let creds = Payload::Credentials(Credentials::new("bob", "p@ss"));

        create_secret(
            State(state.clone()),
            user(1),
            Json(CreateSecretRequest {
                name: "github".to_owned(),
                kind: creds.kind().tag(),
                meta: "work".to_owned(),
                payload_raw: creds.encode().unwrap(),
            }),
        )
        .await
        .unwrap();

        let fetched = get_secret(State(state.clone()), user(1), Path("github".to_owned())).await.unwrap();
        assert_eq!(fetched.0.version, 1);
        assert_eq!(fetched.0.meta, "work");
        assert_eq!(fetched.0.payload_raw, creds.encode().unwrap());

        let creds_v2 = Payload::Credentials(Credentials::new("bob", "p@ss2"));
        update_secret(
            State(state.clone()),
            user(1),
            Path("github".to_owned()),
            Json(UpdateSecretRequest {
                meta: "work2".to_owned(),
                version: 2,
                update_payload: true,
                payload_raw: creds_v2.encode().unwrap(),
            }),
        )
        .await
        .unwrap();

        let fetched = get_secret(State(state.clone()), user(1), Path("github".to_owned())).await.unwrap();
        assert_eq!(fetched.0.version, 2);
        assert_eq!(fetched.0.meta, "work2");
        assert_eq!(fetched.0.payload_raw, creds_v2.encode().unwrap());

        let outdated = update_secret(
            State(state.clone()),
            user(1),
            Path("github".to_owned()),
            Json(UpdateSecretRequest {
                meta: "work3".to_owned(),
                version: 2,
                update_payload: false,
                payload_raw: Vec::new(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(outdated, SecretsError::SecretOutdated { .. }));

        let wrong_version = update_secret(
            State(state.clone()),
            user(1),
            Path("github".to_owned()),
            Json(UpdateSecretRequest {
                meta: "work4".to_owned(),
                version: 5,
                update_payload: false,
                payload_raw: Vec::new(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(wrong_version, SecretsError::InvalidSecret { .. }));

        delete_secret(State(state.clone()), user(1), Path("github".to_owned())).await.unwrap();
        let gone = get_secret(State(state.clone()), user(1), Path("github".to_owned())).await.unwrap_err();
        assert!(matches!(gone, SecretsError::SecretNotFound { .. }));
    }

    #[tokio::test]
    async fn empty_list_is_surfaced_as_no_secrets() {
        let state = state("secrets_empty_list").await;
        let err = list_secrets(State(state), user(1)).await.unwrap_err();
        assert!(matches!(err, SecretsError::NoSecrets { .. }));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name_ascending() {
        let state = state("secrets_list_ordering").await;
        for name in ["beta", "alpha"] {
            create_secret(
                State(state.clone()),
                user(1),
                Json(CreateSecretRequest {
                    name: name.to_owned(),
                    kind: SecretKind::Text.tag(),
                    meta: String::new(),
                    payload_raw: Payload::Text(gophkeeper_domain::secret::Text::new("x")).encode().unwrap(),
                }),
            )
            .await
            .unwrap();
        }

        let listed = list_secrets(State(state), user(1)).await.unwrap();
        let names: Vec<_> = listed.0.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn oversize_payload_is_rejected() {
        let state = state("secrets_oversize").await;
        let oversized = vec![0_u8; MAX_PAYLOAD_SIZE_BYTES + 1];

        let err = create_secret(
            State(state),
            user(1),
            Json(CreateSecretRequest {
                name: "blob".to_owned(),
                kind: SecretKind::Binary.tag(),
                meta: String::new(),
                payload_raw: oversized,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SecretsError::PayloadTooLarge { .. }));
    }

    #[tokio::test]
    async fn unknown_kind_and_empty_name_are_rejected() {
        let state = state("secrets_invalid").await;

        let bad_kind = create_secret(
            State(state.clone()),
            user(1),
            Json(CreateSecretRequest { name: "x".to_owned(), kind: 99, meta: String::new(), payload_raw: vec![] }),
        )
        .await
        .unwrap_err();
        assert!(matches!(bad_kind, SecretsError::InvalidSecret { .. }));

        let bad_name = create_secret(
            State(state),
            user(1),
            Json(CreateSecretRequest {
                name: String::new(),
                kind: SecretKind::Text.tag(),
                meta: String::new(),
                payload_raw: vec![],
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(bad_name, SecretsError::InvalidSecret { .. }));
    }

    #[tokio::test]
    async fn ping_reports_storage_health() {
        let state = state("secrets_ping").await;
        ping(State(state), user(1)).await.unwrap();
    }
}
