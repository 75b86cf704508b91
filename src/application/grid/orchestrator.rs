//! Grid analysis runs and snapshot history.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::cancel::CancelSignal;
use super::config::AnalysisConfig;
use super::sampler::{sample_grid, ProbeSettings};
use crate::domain::{
    business::Business,
    geo::{generate_grid, Coordinate},
    id::{BusinessId, PlaceId, SnapshotId},
    snapshot::{AnalysisRequest, GridSnapshot, SnapshotStatus},
};
use crate::error::{AnalysisError, Result};
use crate::port::outbound::places::{NearbySearch, PlaceLookup};
use crate::port::outbound::store::SnapshotStore;

/// Runs grid analyses and serves their history.
///
/// A run validates the request, resolves the business coordinate, plans the
/// grid, writes a pending shell, samples every point, then commits the
/// snapshot and all of its points at once. Callers get either a committed
/// snapshot or an error; probe failures never fail a run.
pub struct GridAnalysisOrchestrator<S> {
    places: Arc<dyn PlaceLookup>,
    search: Arc<dyn NearbySearch>,
    store: Arc<S>,
    config: AnalysisConfig,
}

impl<S: SnapshotStore> GridAnalysisOrchestrator<S> {
    /// Create an orchestrator over the given collaborators.
    #[must_use]
    pub fn new(
        places: Arc<dyn PlaceLookup>,
        search: Arc<dyn NearbySearch>,
        store: Arc<S>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            places,
            search,
            store,
            config,
        }
    }

    /// Analysis settings in effect.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run a full grid analysis for `business`.
    ///
    /// # Errors
    ///
    /// Fails on invalid parameters, an unresolvable business location, or a
    /// persistence failure. Nothing is left visible in history on failure.
    pub async fn run_analysis(
        &self,
        business: &Business,
        request: &AnalysisRequest,
    ) -> Result<GridSnapshot> {
        self.run_analysis_with_cancel(business, request, &CancelSignal::never())
            .await
    }

    /// Run a grid analysis that stops issuing probes once `cancel` fires.
    ///
    /// A cancelled run still commits every grid point: unprobed points are
    /// recorded as skipped and the snapshot is marked cancelled.
    ///
    /// # Errors
    ///
    /// Same as [`Self::run_analysis`].
    pub async fn run_analysis_with_cancel(
        &self,
        business: &Business,
        request: &AnalysisRequest,
        cancel: &CancelSignal,
    ) -> Result<GridSnapshot> {
        let started = Instant::now();
        request.validate()?;
        if request.business_id != business.id {
            return Err(AnalysisError::BusinessNotFound(request.business_id.clone()).into());
        }

        let place_id = business
            .place_id
            .as_ref()
            .ok_or_else(|| AnalysisError::MissingPlaceId {
                business_id: business.id.clone(),
            })?;
        let center = self.resolve_center(&business.id, place_id).await?;
        let plan = generate_grid(center, request.radius_km, request.grid_size);

        info!(
            business_id = %business.id,
            keyword = %request.keyword,
            radius_km = request.radius_km,
            grid_size = request.grid_size,
            center = %center,
            "Starting grid analysis"
        );

        let shell = GridSnapshot::pending(request, center);
        let snapshot_id = shell.id.clone();
        self.store
            .create_shell(&shell)
            .await
            .map_err(|e| AnalysisError::Persistence {
                snapshot_id: snapshot_id.clone(),
                reason: e.to_string(),
            })?;

        let sampling = sample_grid(
            self.search.as_ref(),
            place_id,
            &request.keyword,
            &plan,
            self.probe_settings(),
            cancel,
        )
        .await;
        let status = if sampling.was_cut_short() {
            SnapshotStatus::Cancelled
        } else {
            SnapshotStatus::Complete
        };
        let snapshot = shell.finalize(sampling.points, status);

        if let Err(err) = self.store.commit(&snapshot).await {
            warn!(snapshot_id = %snapshot_id, error = %err, "Commit failed, discarding shell");
            if let Err(discard_err) = self.store.discard(&snapshot_id).await {
                warn!(
                    snapshot_id = %snapshot_id,
                    error = %discard_err,
                    "Failed to discard snapshot shell"
                );
            }
            return Err(AnalysisError::Persistence {
                snapshot_id,
                reason: err.to_string(),
            }
            .into());
        }

        info!(
            snapshot_id = %snapshot.id,
            status = snapshot.status.as_str(),
            visibility_score = snapshot.visibility_score.unwrap_or_default(),
            average_rank = snapshot.average_rank.unwrap_or_default(),
            found = snapshot.found_count(),
            points = snapshot.points.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Grid analysis committed"
        );

        Ok(snapshot)
    }

    /// Committed snapshots for `business_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn get_history(&self, business_id: &BusinessId) -> Result<Vec<GridSnapshot>> {
        self.store.history(business_id).await
    }

    /// One committed snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn get_snapshot(&self, snapshot_id: &SnapshotId) -> Result<Option<GridSnapshot>> {
        self.store.get(snapshot_id).await
    }

    async fn resolve_center(&self, business_id: &BusinessId, place_id: &PlaceId) -> Result<Coordinate> {
        let details = self
            .places
            .get_place_details(place_id)
            .await
            .map_err(|e| AnalysisError::Unresolvable {
                business_id: business_id.clone(),
                reason: e.to_string(),
            })?;

        match details {
            Some(details) => Ok(details.location),
            None => Err(AnalysisError::Unresolvable {
                business_id: business_id.clone(),
                reason: format!(
                    "{} returned no coordinates for place {place_id}",
                    self.places.provider_name()
                ),
            }
            .into()),
        }
    }

    fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            radius_m: self.config.probe_radius_m,
            timeout: self.config.probe_timeout(),
            max_concurrent: self.config.max_concurrent_probes,
        }
    }
}
