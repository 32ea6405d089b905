use crate::domain::constants::ENV_PREFIX;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "server";

/// Custom error type for config loading.
#[cdesk_derive::cdesk_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads file-based settings and overlays environment overrides.
///
/// 1. **Base File**: `path`, or `server` in the working directory. Any format the `config`
///    crate recognises by extension (`server.toml`, `server.json`, ...). The file is required.
/// 2. **Environment Overrides**: variables prefixed with `CDESK__`; nested keys are separated
///    by double underscores (`CDESK__DATABASE__URL` maps to `database.url`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or the merged values do not
/// deserialize into `T`.
///
/// # Example
/// ```rust
/// use cdesk_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
