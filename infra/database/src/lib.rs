//! # Database Infrastructure
//!
//! Initializes and hands out [SurrealDB](https://surrealdb.com) connections for the workspace.
//!
//! ## Key Features
//! - **Engine Agnostic**: `mem://`, `rocksdb://`, `ws://` and `http://` via the `any` engine.
//! - **Resilient Connectivity**: health-check retries with exponential backoff on startup.
//! - **Embedded Migrations**: schema scripts applied once each and pinned by checksum.
//! - **Scoped Sessions**: [`Database::session`] hands out a per-request handle that is
//!   released when dropped.
//!
//! ## Example
//!
//! ```rust
//! use cdesk_database::{Database, DatabaseError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("mem://")
//!         .session("cdesk", "core")
//!         .init()
//!         .await?;
//!
//!     let session = db.session();
//!     let _version = session.version().await?;
//!
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;
mod session;

pub use error::{DatabaseError, DatabaseErrorExt};
pub use migrations::{AppliedMigration, MigrationReport};
pub use session::DatabaseSession;

use migrations::MigrationRunner;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{info, instrument, trace, warn};

/// Health-check attempts before giving up on the engine.
const HEALTH_ATTEMPTS: u32 = 3;
/// First backoff delay; doubled after every failed attempt.
const HEALTH_BACKOFF: Duration = Duration::from_millis(500);

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
    sessions: AtomicU64,
    active: AtomicU64,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB connection handle dropped");
    }
}

/// `SurrealDB` client wrapper shared through application state.
///
/// Cloning is cheap; all clones share one underlying connection.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Acquires a scoped session for one unit of work.
    ///
    /// The session is released when the returned handle goes out of scope, on every
    /// exit path of the caller.
    #[must_use = "a session does nothing unless queries are run on it"]
    pub fn session(&self) -> DatabaseSession {
        let id = self.inner.sessions.fetch_add(1, Ordering::Relaxed) + 1;
        let active = self.inner.active.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(session = id, active, "Database session acquired");
        DatabaseSession::new(id, Arc::clone(&self.inner))
    }

    /// Number of sessions acquired from this handle and not yet dropped.
    #[must_use]
    pub fn active_sessions(&self) -> u64 {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Re-runs the embedded migrations.
    ///
    /// Already applied versions are skipped after their checksum is verified.
    ///
    /// # Errors
    /// [`DatabaseError::Migration`] on checksum drift, [`DatabaseError::Surreal`] when a
    /// script is rejected.
    pub async fn migrate(&self) -> Result<MigrationReport, DatabaseError> {
        MigrationRunner::new(self.inner.instance.clone()).run().await
    }

    /// Namespace this handle is bound to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.ns
    }

    /// Database name this handle is bound to.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.inner.db
    }
}

/// A fluent builder for configuring and establishing a `SurrealDB` connection.
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

    /// Add root credentials to the connection.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Consumes the builder and establishes the connection.
    ///
    /// # Process
    /// 1. **Validation**: URL, namespace and database name must be set.
    /// 2. **Engine Initialization**: connects through the `any` engine.
    /// 3. **Resilience**: up to 3 health checks with exponential backoff from 500ms.
    /// 4. **Authentication**: root sign-in when credentials were given via [`Self::auth`].
    /// 5. **Session Activation**: selects namespace and database.
    /// 6. **Migrations**: applies pending embedded schema scripts.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if required parameters are missing.
    /// * [`DatabaseError::Connection`] if the engine fails to start or remains unhealthy.
    /// * [`DatabaseError::Auth`] if the provided credentials are rejected.
    /// * [`DatabaseError::Surreal`] if session activation fails.
    /// * [`DatabaseError::Migration`] if an applied migration drifted.
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

        let mut delay = HEALTH_BACKOFF;
        for attempt in 1..=HEALTH_ATTEMPTS {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == HEALTH_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        if let Some((username, password)) = self.auth {
            instance.signin(Root { username, password }).await.map_err(|e| {
                DatabaseError::Auth { message: e.to_string().into(), context: Some(url.into()) }
            })?;
        }

        instance.use_ns(&ns).use_db(&db).await.context("Activating session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        let report = MigrationRunner::new(instance.clone()).run().await?;
        for skipped in &report.skipped {
            trace!(version = %skipped.version, "Skipping migration");
        }
        for applied in &report.applied {
            info!(version = %applied.version, "Applied migration");
        }

        Ok(Database {
            inner: Arc::new(DatabaseInner {
                instance,
                ns,
                db,
                sessions: AtomicU64::new(0),
                active: AtomicU64::new(0),
            }),
        })
    }
}
