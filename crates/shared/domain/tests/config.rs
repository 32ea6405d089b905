use cdesk_domain::config::{ApiConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "cdesk");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_none());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.path.is_none());
    assert!(!logging.json);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": {
            "url": "ws://db:8000",
            "namespace": "n",
            "database": "d",
            "credentials": { "username": "admin", "password": "secret" }
        },
        "logging": { "level": "debug", "path": "/tmp/logs", "json": true }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.url, "ws://db:8000");
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.database.credentials.as_ref().map(|c| c.username.as_str()), Some("admin"));
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.path, Some(std::path::PathBuf::from("/tmp/logs")));
    assert!(cfg.logging.json);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({ "server": { "port": 9000 } }))
        .expect("config deserialize");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn deref_mut_clones_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 1;

    assert_eq!(original.server.port, 4583);
    assert_eq!(changed.server.port, 1);
}
