//! # Logger
//!
//! Installs the global `tracing` subscriber for Contact Desk binaries: a compact console
//! layer, an optional rolling file layer (plain or JSON) written through a non-blocking
//! worker, and an env filter where `RUST_LOG` overrides the configured default.
//!
//! ## Example
//!
//! ```rust
//! use cdesk_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("cdesk-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use cdesk_domain::config::LoggingConfig;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Builder for the global tracing subscriber. Obtain it via [`Logger::builder`].
#[derive(Debug)]
#[must_use = "The builder does nothing until .init() is called"]
pub struct LoggerBuilder {
    name: Option<String>,
    console: bool,
    stderr: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: None,
            console: true,
            stderr: false,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

impl LoggerBuilder {
    /// Names the logger; also the prefix of rolling log files.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Minimum level emitted when neither `RUST_LOG` nor an env filter says otherwise.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Programmatic filter directives (e.g. `cdesk_contacts=debug,hyper=info`).
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Toggles the console layer.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Sends console output to stderr, keeping stdout free for program output.
    pub const fn stderr(mut self, enabled: bool) -> Self {
        self.stderr = enabled;
        self
    }

    /// Writes rolling log files into `path`.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// File rotation strategy; only meaningful together with [`Self::path`].
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Maximum number of rotated files kept on disk.
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Formats file output as JSON lines.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Applies the `logging` section of the application config.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] when `level` is not a valid level.
    pub fn config(mut self, config: &LoggingConfig) -> Result<Self, LoggerError> {
        self.level = LevelFilter::from_str(&config.level).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid log level '{}': {e}", config.level).into(),
                context: Some("logging.level".into()),
            }
        })?;
        self.path.clone_from(&config.path);
        self.json = config.json;
        Ok(self)
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// Keep the returned [`Logger`] alive for the lifetime of the program so buffered file
    /// output is flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a missing name, zero `max_files`, a bad
    ///   filter or no enabled layer.
    /// * [`LoggerError::Appender`] if the log directory cannot be used.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.validate()?;
        let env_filter = self.build_env_filter()?;

        let mut layers = Vec::new();
        if self.console {
            let console = layer().compact().with_ansi(true);
            layers.push(if self.stderr {
                console.with_writer(std::io::stderr).boxed()
            } else {
                console.boxed()
            });
        }

        let guard = match &self.path {
            Some(path) => {
                fs::create_dir_all(path).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Failed to create path: {}", path.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(self.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.max_files)
                    .build(path)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if self.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            }
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { name, guard })
    }

    fn validate(&self) -> Result<String, LoggerError> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        Ok(name.to_owned())
    }

    fn build_env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{filter}': {e}").into(),
                    context: None,
                })
            },
        )
    }
}

/// Handle to the installed logging system.
///
/// Holds the non-blocking writer guard when file output is enabled; drop it only on
/// shutdown.
#[must_use = "Dropping this handle stops background file logging"]
#[derive(Debug)]
pub struct Logger {
    name: String,
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Name given at build time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!(logger = %self.name, "Logging system shutting down, flushing buffers...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder();
        assert!(builder.console);
        assert!(!builder.stderr);
        assert_eq!(builder.level, LevelFilter::INFO);
        assert_eq!(builder.max_files, DEFAULT_MAX_FILES);
        assert!(builder.path.is_none());
        assert!(!builder.json);
    }

    #[test]
    fn config_section_is_applied() {
        let config = LoggingConfig {
            level: "debug".to_owned(),
            path: Some(PathBuf::from("logs")),
            json: true,
        };
        let builder = Logger::builder().name("cdesk").config(&config).expect("valid config");
        assert_eq!(builder.level, LevelFilter::DEBUG);
        assert_eq!(builder.path.as_deref(), Some(std::path::Path::new("logs")));
        assert!(builder.json);
    }

    #[test]
    fn invalid_level_is_rejected() {
        let config = LoggingConfig { level: "loud".to_owned(), ..LoggingConfig::default() };
        let err = Logger::builder().config(&config).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn missing_name_is_rejected() {
        let err = Logger::builder().init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder().name("   ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn zero_max_files_is_rejected() {
        let err = Logger::builder().name("cdesk").max_files(0).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn bad_filter_is_rejected() {
        let err = Logger::builder().name("cdesk").env_filter("cdesk=[").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn no_layers_is_rejected() {
        let err = Logger::builder().name("cdesk").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
