//! Per-point rank probing.
//!
//! Probes run with bounded concurrency and a per-probe time budget. A probe
//! that fails or overruns degrades to a not-found point; it never aborts the
//! run. Results are returned in row-major order whatever order they complete
//! in.

use std::pin::pin;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::cancel::CancelSignal;
use crate::domain::{
    geo::Coordinate,
    id::{PlaceId, PointId},
    score::Rank,
    snapshot::{GridPoint, PointMetadata, ProbeOutcome},
};
use crate::port::outbound::places::{NearbyPlace, NearbySearch};

/// Completed points between progress log lines.
const PROGRESS_INTERVAL: usize = 5;

/// How each probe is issued.
#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    /// Search radius around each grid point, in meters.
    pub radius_m: u32,
    /// Time budget of one probe.
    pub timeout: Duration,
    /// Probes in flight at once.
    pub max_concurrent: usize,
}

/// Outcome of sampling a planned grid.
#[derive(Debug)]
pub struct Sampling {
    /// One point per planned coordinate, row-major.
    pub points: Vec<GridPoint>,
    /// Number of points never probed because the run was cancelled.
    pub skipped: usize,
}

impl Sampling {
    /// True when cancellation left points unprobed.
    #[must_use]
    pub const fn was_cut_short(&self) -> bool {
        self.skipped > 0
    }
}

/// Rank of `target` within an ordered result list.
#[must_use]
pub fn rank_in_results(results: &[NearbyPlace], target: &PlaceId) -> Rank {
    results
        .iter()
        .position(|place| &place.place_id == target)
        .map_or(Rank::NotFound, Rank::from_index)
}

/// Probe every coordinate in `plan` for `keyword`, looking for `target`.
///
/// Once `cancel` fires no new probes are issued; probes already in flight
/// complete and the remaining points are recorded as skipped.
pub async fn sample_grid(
    search: &dyn NearbySearch,
    target: &PlaceId,
    keyword: &str,
    plan: &[Coordinate],
    settings: ProbeSettings,
    cancel: &CancelSignal,
) -> Sampling {
    let total = plan.len();
    let mut slots: Vec<Option<GridPoint>> = vec![None; total];

    let mut probes = pin!(stream::iter(plan.iter().copied().enumerate())
        .take_until(cancel.cancelled())
        .map(|(index, coordinate)| probe_point(search, target, keyword, index, coordinate, settings))
        .buffer_unordered(settings.max_concurrent.max(1)));

    let mut completed = 0usize;
    while let Some((index, point)) = probes.next().await {
        slots[index] = Some(point);
        completed += 1;
        if completed % PROGRESS_INTERVAL == 0 || completed == total {
            info!(completed, total, "Grid sampling progress");
        }
    }

    let mut skipped = 0usize;
    let points = slots
        .into_iter()
        .zip(plan)
        .enumerate()
        .map(|(index, (slot, &coordinate))| {
            slot.unwrap_or_else(|| {
                skipped += 1;
                unsampled_point(index, coordinate, ProbeOutcome::Skipped)
            })
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, total, "Grid sampling cancelled");
    }

    Sampling { points, skipped }
}

async fn probe_point(
    search: &dyn NearbySearch,
    target: &PlaceId,
    keyword: &str,
    index: usize,
    coordinate: Coordinate,
    settings: ProbeSettings,
) -> (usize, GridPoint) {
    let outcome = timeout(
        settings.timeout,
        search.search_nearby(coordinate, keyword, settings.radius_m),
    )
    .await;

    let point = match outcome {
        Ok(Ok(results)) => {
            let rank = rank_in_results(&results, target);
            let competitor_winner = if rank.is_top() {
                None
            } else {
                results.first().map(|place| place.name.clone())
            };
            debug!(
                position = index,
                location = %coordinate,
                rank = %rank,
                results = results.len(),
                "Probed grid point"
            );
            GridPoint {
                id: PointId::new(),
                position: position_of(index),
                coordinate,
                rank,
                competitor_winner,
                metadata: PointMetadata::ok(u32::try_from(results.len()).unwrap_or(u32::MAX)),
            }
        }
        Ok(Err(err)) => {
            warn!(
                position = index,
                location = %coordinate,
                provider = search.provider_name(),
                error = %err,
                "Probe failed, recording not found"
            );
            unsampled_point(index, coordinate, ProbeOutcome::Failed)
        }
        Err(_) => {
            warn!(
                position = index,
                location = %coordinate,
                timeout_ms = settings.timeout.as_millis() as u64,
                "Probe timed out, recording not found"
            );
            unsampled_point(index, coordinate, ProbeOutcome::TimedOut)
        }
    };

    (index, point)
}

fn unsampled_point(index: usize, coordinate: Coordinate, outcome: ProbeOutcome) -> GridPoint {
    GridPoint {
        id: PointId::new(),
        position: position_of(index),
        coordinate,
        rank: Rank::NotFound,
        competitor_winner: None,
        metadata: PointMetadata::without_results(outcome),
    }
}

// Grids are at most 9x9, so the index always fits.
fn position_of(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, name: &str) -> NearbyPlace {
        NearbyPlace::new(id, name)
    }

    #[test]
    fn rank_is_index_plus_one() {
        let results = vec![place("a", "A"), place("b", "B"), place("c", "C")];
        assert_eq!(rank_in_results(&results, &PlaceId::new("a")), Rank::at(1));
        assert_eq!(rank_in_results(&results, &PlaceId::new("c")), Rank::at(3));
    }

    #[test]
    fn missing_target_is_not_found() {
        let results = vec![place("a", "A")];
        assert_eq!(rank_in_results(&results, &PlaceId::new("z")), Rank::NotFound);
        assert_eq!(rank_in_results(&[], &PlaceId::new("z")), Rank::NotFound);
    }

    #[test]
    fn target_beyond_search_depth_is_not_found() {
        let mut results: Vec<_> = (0..25).map(|i| place(&format!("p{i}"), "P")).collect();
        results.push(place("target", "T"));
        assert_eq!(
            rank_in_results(&results, &PlaceId::new("target")),
            Rank::NotFound
        );
        assert_eq!(rank_in_results(&results, &PlaceId::new("p19")), Rank::at(20));
    }

    #[test]
    fn cut_short_only_when_points_skipped() {
        let sampling = Sampling {
            points: Vec::new(),
            skipped: 0,
        };
        assert!(!sampling.was_cut_short());
    }
}
