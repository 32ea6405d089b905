use crate::DatabaseInner;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tracing::trace;

/// A scoped handle for one unit of work, obtained from [`crate::Database::session`].
///
/// Dereferences to the `SurrealDB` client. Dropping it releases the session.
#[derive(Debug)]
pub struct DatabaseSession {
    id: u64,
    database: Arc<DatabaseInner>,
    acquired: Instant,
}

impl DatabaseSession {
    pub(crate) fn new(id: u64, database: Arc<DatabaseInner>) -> Self {
        Self { id, database, acquired: Instant::now() }
    }

    /// Monotonic session number, unique per [`crate::Database`].
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Deref for DatabaseSession {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.database.instance
    }
}

impl Drop for DatabaseSession {
    fn drop(&mut self) {
        let active = self.database.active.fetch_sub(1, Ordering::AcqRel).saturating_sub(1);
        trace!(
            session = self.id,
            active,
            held_ms = self.acquired.elapsed().as_millis(),
            "Database session released"
        );
    }
}
