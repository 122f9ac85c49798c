use gophkeeper_domain::config::{ApiConfig, DatabaseConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());
    assert_eq!(server.shutdown_timeout_secs, 10);

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "gophkeeper");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_some());
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "security": { "server_key": "01234567890123456789012345678901" },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.security.server_key.len(), 32);
}
