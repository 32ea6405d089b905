use cdesk_kernel::config::{ConfigError, load_config};
use cdesk_kernel::domain::config::ApiConfig;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_file_and_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8080

[database]
namespace = "desk"

[logging]
level = "debug"
json = true
"#,
    )?;

    let cfg: ApiConfig = load_config(Some(&path))?;
    assert_eq!(cfg.server.port, 8080);
    assert!(cfg.server.ssl.is_none());
    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.database.namespace, "desk");
    assert_eq!(cfg.database.database, "core");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let result = load_config::<ApiConfig>(Some(dir.path().join("absent.toml")));
    let err = result.expect_err("file is required");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn type_mismatch_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = \"not a port\"\n")?;

    let err = load_config::<ApiConfig>(Some(&path)).expect_err("port must be numeric");
    assert!(err.to_string().contains("Failed to deserialize config"));
    Ok(())
}
