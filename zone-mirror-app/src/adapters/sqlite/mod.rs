//! SQLite-based zone cache using `SeaORM`.
//!
//! A single `SqliteStore` implements both `ZoneRepository` and
//! `DnsRecordRepository`, backed by a local `SQLite` database. The schema
//! migration ledger is applied idempotently at construction.

pub(crate) mod entity;
mod migration;
mod record_repo;
mod zone_repo;

use std::path::Path;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use zone_mirror_core::error::{CoreError, CoreResult};

use migration::Migrator;

/// SQLite-based cache for zones and their DNS records.
///
/// Implements both storage traits (`ZoneRepository`, `DnsRecordRepository`)
/// against a single `SQLite` database file. Access is connection-pool-backed
/// and per-operation; no transaction is held across a network call.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Create a new `SQLite` store.
    ///
    /// - `db_path`: Path to the `SQLite` database file (created if not exists).
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        log::debug!("Connecting to SQLite database at {}", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        // Ensure schema is up to date before the store is used.
        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;
        log::info!("Zone cache schema is up to date");

        Ok(store)
    }
}
