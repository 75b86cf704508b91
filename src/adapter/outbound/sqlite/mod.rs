//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the business and snapshot
//! stores using Diesel ORM.

pub mod business;
pub mod database;
pub mod snapshot;

pub use business::SqliteBusinessStore;
pub use database::connection::{create_pool, run_migrations, sqlite_url, DbPool};
pub use snapshot::SqliteSnapshotStore;
