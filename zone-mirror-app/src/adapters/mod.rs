//! Storage adapters for zone-mirror frontends.

mod sqlite;

pub use sqlite::SqliteStore;
