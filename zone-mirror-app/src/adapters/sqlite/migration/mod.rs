//! `SeaORM` migrations for `SqliteStore`.
//!
//! Applied idempotently at store construction. The ledger only ever grows,
//! and post-initial steps are additive-only (SQLite cannot drop columns).

pub use sea_orm_migration::prelude::*;

mod m20250312_000001_create_zone_tables;
mod m20250318_000001_add_dnssec_status;
mod m20250402_000001_add_analytics_columns;

/// Migration entrypoint used by `sea_orm_migration::MigratorTrait`.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250312_000001_create_zone_tables::Migration),
            Box::new(m20250318_000001_add_dnssec_status::Migration),
            Box::new(m20250402_000001_add_analytics_columns::Migration),
        ]
    }
}
