use gophkeeper_database::*;

async fn memory_db(ns: &str) -> Database {
    Database::builder().url("mem://").session(ns, "core").init().await.expect("connect to mem://")
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = memory_db("health_check").await;
    db.health().await.expect("health check");
    assert!(db.ping().await.expect("ping"));
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn create_user_assigns_sequential_ids_and_rejects_duplicates() {
    let db = memory_db("users_ns").await;

    let alice = db.create_user("alice", "hash-1").await.expect("create alice");
    let bob = db.create_user("bob", "hash-2").await.expect("create bob");
    assert_eq!(bob, alice + 1);

    let err = db.create_user("alice", "hash-3").await.unwrap_err();
    assert!(matches!(err, DatabaseError::UserExists { .. }));
}

#[tokio::test]
async fn find_user_round_trips_and_reports_missing() {
    let db = memory_db("find_user_ns").await;

    db.create_user("alice", "hashed-secret").await.expect("create alice");
    let (user_id, password) = db.find_user("alice").await.expect("find alice");
    assert_eq!(password, "hashed-secret");
    assert!(user_id >= 1);

    let err = db.find_user("ghost").await.unwrap_err();
    assert!(matches!(err, DatabaseError::UserNotFound { .. }));
}

#[tokio::test]
async fn secret_crud_lifecycle() {
    let db = memory_db("secret_crud_ns").await;
    let user_id = db.create_user("alice", "hash").await.expect("create alice");

    db.create_secret(
        user_id,
        NewSecret {
            name: "github".to_owned(),
            kind: 1,
            meta: "work".to_owned(),
            payload_ciphertext: b"ciphertext-v1".to_vec(),
        },
    )
    .await
    .expect("create secret");

    let dup = db
        .create_secret(
            user_id,
            NewSecret {
                name: "github".to_owned(),
                kind: 1,
                meta: String::new(),
                payload_ciphertext: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(dup, DatabaseError::SecretExists { .. }));

    let fetched = db.get_secret(user_id, "github").await.expect("get secret");
    assert_eq!(fetched.version, 1);
    assert_eq!(fetched.meta, "work");
    assert_eq!(fetched.payload_ciphertext, b"ciphertext-v1");

    let new_version = db
        .update_secret(
            user_id,
            "github",
            SecretUpdate {
                meta: "work2".to_owned(),
                version: 2,
                replace_payload: true,
                payload_ciphertext: b"ciphertext-v2".to_vec(),
            },
        )
        .await
        .expect("update secret");
    assert_eq!(new_version, 2);

    let outdated = db
        .update_secret(
            user_id,
            "github",
            SecretUpdate {
                meta: "work3".to_owned(),
                version: 2,
                replace_payload: false,
                payload_ciphertext: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(outdated, DatabaseError::SecretOutdated { .. }));

    let wrong_version = db
        .update_secret(
            user_id,
            "github",
            SecretUpdate {
                meta: "work4".to_owned(),
                version: 5,
                replace_payload: false,
                payload_ciphertext: Vec::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(wrong_version, DatabaseError::SecretWrongVersion { .. }));

    db.delete_secret(user_id, "github").await.expect("delete secret");
    db.delete_secret(user_id, "github").await.expect("delete is idempotent");

    let gone = db.get_secret(user_id, "github").await.unwrap_err();
    assert!(matches!(gone, DatabaseError::SecretNotFound { .. }));
}

#[tokio::test]
async fn list_secrets_is_ordered_by_name_ascending() {
    let db = memory_db("list_secrets_ns").await;
    let user_id = db.create_user("alice", "hash").await.expect("create alice");

    for name in ["beta", "alpha"] {
        db.create_secret(
            user_id,
            NewSecret {
                name: name.to_owned(),
                kind: 2,
                meta: String::new(),
                payload_ciphertext: b"c".to_vec(),
            },
        )
        .await
        .expect("create secret");
    }

    let listed = db.list_secrets(user_id).await.expect("list secrets");
    let names: Vec<_> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}
