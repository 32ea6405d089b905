use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Creates the bookkeeping table; idempotent and applied before anything else.
const BOOTSTRAP: &str = include_str!("../schema/0000_migrations.surql");

/// Ordered schema scripts. Append only: applied versions are pinned by checksum.
const MIGRATIONS: &[(&str, &str)] = &[("0001_contacts", include_str!("../schema/0001_contacts.surql"))];

/// A schema script embedded in the binary.
#[derive(Debug, Clone)]
pub(crate) struct Migration {
    pub version: &'static str,
    pub script: &'static str,
    pub checksum: String,
}

impl Migration {
    pub(crate) fn new(version: &'static str, script: &'static str) -> Self {
        Self { version, script, checksum: checksum(script) }
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration { version: self.version.to_owned(), checksum: self.checksum.clone() }
    }
}

/// Outcome of a migration run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

/// A migration row as recorded in the `migration` table.
#[derive(Debug, Clone, PartialEq, Eq, SurrealValue)]
pub struct AppliedMigration {
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
    migrations: Vec<Migration>,
}

impl MigrationRunner {
    pub(crate) fn new(db: Surreal<Any>) -> Self {
        let migrations = MIGRATIONS.iter().map(|(version, script)| Migration::new(version, script));
        Self { db, migrations: migrations.collect() }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        self.db
            .query(BOOTSTRAP)
            .await
            .context("Bootstrapping migration table")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Bootstrapping migration table")?;

        let applied = self.applied_migrations().await?;
        let mut report = MigrationReport::default();

        for migration in &self.migrations {
            if let Some(existing) = applied.get(migration.version) {
                ensure_checksum_match(migration, &existing.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ version: $version, checksum: $checksum }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("version", migration.version.to_owned()))
            .bind(("checksum", migration.checksum.clone()))
            .await
            .context(format!("SQL execution failed at {}", migration.version))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Migration {} rejected", migration.version))?;

        Ok(())
    }

    async fn applied_migrations(&self) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing applied migrations")?;

        Ok(entries.into_iter().map(|entry| (entry.version.clone(), entry)).collect())
    }
}

fn checksum(script: &str) -> String {
    hex::encode(Sha256::digest(script.as_bytes()))
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    if existing != migration.checksum {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (recorded {}, embedded {})",
                migration.version, existing, migration.checksum
            )
            .into(),
            context: Some("Migration already applied with different contents".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_stable_hex_sha256() {
        let first = checksum("DEFINE TABLE contact;");
        assert_eq!(first.len(), 64);
        assert_eq!(first, checksum("DEFINE TABLE contact;"));
        assert_ne!(first, checksum("DEFINE TABLE contacts;"));
    }

    #[test]
    fn matching_checksum_passes() {
        let migration = Migration::new("0001_test", "DEFINE TABLE t;");
        let recorded = migration.checksum.clone();
        assert!(ensure_checksum_match(&migration, &recorded).is_ok());
    }

    #[test]
    fn drifted_checksum_is_rejected() {
        let migration = Migration::new("0001_test", "DEFINE TABLE t;");
        let err = ensure_checksum_match(&migration, "deadbeef").unwrap_err();
        assert!(matches!(err, DatabaseError::Migration { .. }));
        assert!(err.to_string().contains("0001_test"));
    }

    #[test]
    fn embedded_versions_are_ordered_and_unique() {
        let versions: Vec<_> = MIGRATIONS.iter().map(|(version, _)| *version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }
}
