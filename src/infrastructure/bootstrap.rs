//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::places::GooglePlacesClient;
use crate::adapter::outbound::sqlite::{
    create_pool, run_migrations, sqlite_url, DbPool, SqliteBusinessStore, SqliteSnapshotStore,
};
use crate::application::business::BusinessRegistry;
use crate::application::grid::GridAnalysisOrchestrator;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::places::{NearbySearch, PlaceLookup};

/// Open the configured database and bring its schema up to date.
///
/// # Errors
///
/// Returns an error if the pool cannot be created or migrations fail.
pub fn build_pool(config: &Config) -> Result<DbPool> {
    let db_url = sqlite_url(&config.database);
    let pool = create_pool(&db_url)?;
    run_migrations(&pool)?;
    debug!(database = %config.database, "Database ready");
    Ok(pool)
}

/// Business registry over the SQLite store.
#[must_use]
pub fn build_business_registry(pool: &DbPool) -> BusinessRegistry<SqliteBusinessStore> {
    BusinessRegistry::new(Arc::new(SqliteBusinessStore::new(pool.clone())))
}

/// Orchestrator wired to Google Places and the SQLite snapshot store.
///
/// # Errors
///
/// Returns a config error when no Places API key is available.
pub fn build_orchestrator(
    config: &Config,
    pool: &DbPool,
) -> Result<GridAnalysisOrchestrator<SqliteSnapshotStore>> {
    let client = Arc::new(GooglePlacesClient::from_config(&config.places)?);
    let places: Arc<dyn PlaceLookup> = client.clone();
    let search: Arc<dyn NearbySearch> = client;
    Ok(GridAnalysisOrchestrator::new(
        places,
        search,
        Arc::new(SqliteSnapshotStore::new(pool.clone())),
        config.analysis.clone(),
    ))
}

/// Snapshot history reader that needs no Places credentials.
#[must_use]
pub fn build_snapshot_store(pool: &DbPool) -> SqliteSnapshotStore {
    SqliteSnapshotStore::new(pool.clone())
}
