//! End-to-end grid analysis runs against fake places and an in-memory store.

use std::sync::Arc;
use std::time::Duration;

use gridrank::application::grid::{AnalysisConfig, CancelSignal, GridAnalysisOrchestrator};
use gridrank::domain::business::Business;
use gridrank::domain::error::DomainError;
use gridrank::domain::score::Rank;
use gridrank::domain::snapshot::{AnalysisRequest, ProbeOutcome, SnapshotStatus};
use gridrank::error::{AnalysisError, Error};
use gridrank::testkit::domain::{
    business, business_without_place, fast_config, request, CENTER, TARGET_PLACE,
};
use gridrank::testkit::places::{competitors, ranked, Probe, ScriptedSearch, StaticPlaceLookup};
use gridrank::testkit::store::InMemorySnapshotStore;

struct Harness {
    orchestrator: GridAnalysisOrchestrator<InMemorySnapshotStore>,
    search: Arc<ScriptedSearch>,
    store: Arc<InMemorySnapshotStore>,
}

fn harness<F>(radius_km: f64, grid_size: u32, config: AnalysisConfig, script: F) -> Harness
where
    F: Fn(usize) -> Probe + Send + Sync + 'static,
{
    let places = Arc::new(StaticPlaceLookup::new().with_place(TARGET_PLACE, CENTER));
    let search = Arc::new(ScriptedSearch::for_grid(CENTER, radius_km, grid_size, script));
    let store = Arc::new(InMemorySnapshotStore::new());
    let orchestrator = GridAnalysisOrchestrator::new(
        places,
        search.clone(),
        Arc::clone(&store),
        config,
    );
    Harness {
        orchestrator,
        search,
        store,
    }
}

fn middle_row_first(position: usize) -> Probe {
    if (3..=5).contains(&position) {
        Probe::Results(ranked(TARGET_PLACE, 1))
    } else {
        Probe::Results(competitors(20))
    }
}

// -------------------------------------------------------------------------
// Successful runs
// -------------------------------------------------------------------------

#[tokio::test]
async fn middle_row_at_rank_one_scores_one_third() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    let business = business();

    let snapshot = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap();

    assert_eq!(snapshot.status, SnapshotStatus::Complete);
    assert_eq!(snapshot.points.len(), 9);
    assert_eq!(snapshot.visibility_score, Some(33.3));
    let avg = snapshot.average_rank.unwrap();
    assert!((avg - 43.0 / 3.0).abs() < 1e-9, "average rank was {avg}");
    assert_eq!(snapshot.found_count(), 3);
    assert_eq!(snapshot.center, CENTER);

    for point in &snapshot.points {
        if (3..=5).contains(&point.position) {
            assert_eq!(point.rank, Rank::at(1));
            assert!(point.competitor_winner.is_none());
        } else {
            assert_eq!(point.rank, Rank::NotFound);
            assert_eq!(point.competitor_winner.as_deref(), Some("Competitor 1"));
        }
        assert_eq!(point.metadata.outcome, ProbeOutcome::Ok);
    }
    assert_eq!(h.search.calls(), 9);
}

#[tokio::test]
async fn every_point_found_at_rank_one_scores_full_marks() {
    let h = harness(2.0, 5, fast_config(4), |_| {
        Probe::Results(ranked(TARGET_PLACE, 1))
    });
    let business = business();

    let snapshot = h
        .orchestrator
        .run_analysis(&business, &request(&business, 2.0, 5))
        .await
        .unwrap();

    assert_eq!(snapshot.points.len(), 25);
    assert_eq!(snapshot.visibility_score, Some(100.0));
    assert_eq!(snapshot.average_rank, Some(1.0));
}

#[tokio::test]
async fn competitor_winner_is_top_result_when_ranked_lower() {
    let h = harness(1.0, 3, fast_config(2), |_| {
        Probe::Results(ranked(TARGET_PLACE, 3))
    });
    let business = business();

    let snapshot = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap();

    for point in &snapshot.points {
        assert_eq!(point.rank, Rank::at(3));
        assert_eq!(point.competitor_winner.as_deref(), Some("Competitor 1"));
        assert_eq!(point.metadata.result_count, 3);
    }
}

#[tokio::test]
async fn points_are_row_major_whatever_order_probes_finish() {
    // Early positions answer last.
    let h = harness(1.0, 4, fast_config(4), |position| {
        let delay = Duration::from_millis(5 * (16 - position as u64));
        Probe::Delayed(delay, ranked(TARGET_PLACE, position + 1))
    });
    let business = business();

    let snapshot = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 4))
        .await
        .unwrap();

    let positions: Vec<u32> = snapshot.points.iter().map(|p| p.position).collect();
    assert_eq!(positions, (0..16).collect::<Vec<_>>());
    for (i, point) in snapshot.points.iter().enumerate() {
        assert_eq!(point.rank, Rank::at(i as u32 + 1));
    }
    // North-west corner first, south-east corner last.
    let first = snapshot.points[0].coordinate;
    let last = snapshot.points[15].coordinate;
    assert!(first.lat > CENTER.lat && first.lng < CENTER.lng);
    assert!(last.lat < CENTER.lat && last.lng > CENTER.lng);
}

#[tokio::test]
async fn concurrency_never_exceeds_configured_limit() {
    let h = harness(1.0, 5, fast_config(3), |_| {
        Probe::Delayed(Duration::from_millis(10), competitors(2))
    });
    let business = business();

    h.orchestrator
        .run_analysis(&business, &request(&business, 1.0, 5))
        .await
        .unwrap();

    assert_eq!(h.search.calls(), 25);
    assert!(h.search.max_in_flight() <= 3);
    assert!(h.search.max_in_flight() >= 2);
}

// -------------------------------------------------------------------------
// Degraded probes
// -------------------------------------------------------------------------

#[tokio::test]
async fn failed_probe_degrades_to_not_found() {
    let h = harness(1.0, 3, fast_config(4), |position| {
        if position == 4 {
            Probe::Fail("quota exceeded".into())
        } else {
            Probe::Results(ranked(TARGET_PLACE, 1))
        }
    });
    let business = business();

    let snapshot = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap();

    assert_eq!(snapshot.status, SnapshotStatus::Complete);
    assert_eq!(snapshot.points.len(), 9);
    let failed = &snapshot.points[4];
    assert_eq!(failed.rank, Rank::NotFound);
    assert_eq!(failed.metadata.outcome, ProbeOutcome::Failed);
    assert_eq!(failed.metadata.result_count, 0);
    assert!(failed.competitor_winner.is_none());
    assert_eq!(snapshot.visibility_score, Some(88.9));
}

#[tokio::test]
async fn all_probes_failing_still_commits_a_full_grid() {
    let h = harness(1.0, 3, fast_config(4), |_| Probe::Fail("offline".into()));
    let business = business();

    let snapshot = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap();

    assert_eq!(snapshot.points.len(), 9);
    assert_eq!(snapshot.visibility_score, Some(0.0));
    assert_eq!(snapshot.average_rank, Some(21.0));
    assert_eq!(h.orchestrator.get_history(&business.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn hung_probe_is_recorded_as_timed_out() {
    let h = harness(1.0, 3, fast_config(9), |position| {
        if position == 0 {
            Probe::Hang
        } else {
            Probe::Results(ranked(TARGET_PLACE, 2))
        }
    });
    let business = business();

    let snapshot = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap();

    assert_eq!(snapshot.status, SnapshotStatus::Complete);
    assert_eq!(snapshot.points[0].metadata.outcome, ProbeOutcome::TimedOut);
    assert_eq!(snapshot.points[0].rank, Rank::NotFound);
    assert!(snapshot.points[1..]
        .iter()
        .all(|p| p.rank == Rank::at(2) && p.metadata.outcome == ProbeOutcome::Ok));
}

// -------------------------------------------------------------------------
// Cancellation
// -------------------------------------------------------------------------

#[tokio::test]
async fn cancellation_commits_partial_snapshot_with_skipped_points() {
    let h = harness(1.0, 5, fast_config(1), |_| {
        Probe::Delayed(Duration::from_millis(20), ranked(TARGET_PLACE, 1))
    });
    let business = business();
    let (handle, cancel) = CancelSignal::pair();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(70)).await;
        handle.cancel();
    });

    let snapshot = h
        .orchestrator
        .run_analysis_with_cancel(&business, &request(&business, 1.0, 5), &cancel)
        .await
        .unwrap();

    assert_eq!(snapshot.status, SnapshotStatus::Cancelled);
    assert_eq!(snapshot.points.len(), 25);
    let probed = snapshot
        .points
        .iter()
        .filter(|p| p.metadata.outcome == ProbeOutcome::Ok)
        .count();
    let skipped = snapshot
        .points
        .iter()
        .filter(|p| p.metadata.outcome == ProbeOutcome::Skipped)
        .count();
    assert!(probed >= 1 && probed < 25, "probed {probed}");
    assert_eq!(probed + skipped, 25);
    assert_eq!(h.search.calls(), probed);
    // Probes run in row-major order with one in flight, so the probed
    // points form a prefix.
    assert!(snapshot.points[..probed]
        .iter()
        .all(|p| p.metadata.outcome == ProbeOutcome::Ok));

    let history = h.orchestrator.get_history(&business.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, SnapshotStatus::Cancelled);
}

#[tokio::test]
async fn cancelled_before_start_skips_every_point() {
    let h = harness(1.0, 3, fast_config(4), |_| Probe::Results(competitors(1)));
    let business = business();
    let (handle, cancel) = CancelSignal::pair();
    handle.cancel();

    let snapshot = h
        .orchestrator
        .run_analysis_with_cancel(&business, &request(&business, 1.0, 3), &cancel)
        .await
        .unwrap();

    assert_eq!(snapshot.status, SnapshotStatus::Cancelled);
    assert_eq!(h.search.calls(), 0);
    assert!(snapshot
        .points
        .iter()
        .all(|p| p.metadata.outcome == ProbeOutcome::Skipped && p.rank == Rank::NotFound));
    assert_eq!(snapshot.visibility_score, Some(0.0));
}

// -------------------------------------------------------------------------
// Failures
// -------------------------------------------------------------------------

#[tokio::test]
async fn commit_failure_leaves_no_visible_snapshot() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    h.store.fail_commits(true);
    let business = business();

    let err = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::Persistence { .. })
    ));
    assert!(h.orchestrator.get_history(&business.id).await.unwrap().is_empty());
    assert_eq!(h.store.pending_count(), 0);
    assert_eq!(h.store.raw_len(), 0);
}

#[tokio::test]
async fn shell_failure_issues_no_probes() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    h.store.fail_creates(true);
    let business = business();

    let err = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::Persistence { .. })
    ));
    assert_eq!(h.search.calls(), 0);
}

#[tokio::test]
async fn missing_place_id_fails_before_any_probe() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    let business = business_without_place();

    let err = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::MissingPlaceId { .. })
    ));
    assert_eq!(h.search.calls(), 0);
    assert_eq!(h.store.raw_len(), 0);
}

#[tokio::test]
async fn unknown_place_is_unresolvable() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    let mut business = business();
    business.place_id = Some("elsewhere".into());

    let err = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::Unresolvable { .. })
    ));
    assert_eq!(h.store.raw_len(), 0);
}

#[tokio::test]
async fn lookup_failure_is_unresolvable() {
    let places = Arc::new(StaticPlaceLookup::failing("REQUEST_DENIED"));
    let search = Arc::new(ScriptedSearch::for_grid(CENTER, 1.0, 3, middle_row_first));
    let store = Arc::new(InMemorySnapshotStore::new());
    let orchestrator =
        GridAnalysisOrchestrator::new(places, search.clone(), store, fast_config(4));
    let business = business();

    let err = orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap_err();

    match err {
        Error::Analysis(AnalysisError::Unresolvable { reason, .. }) => {
            assert!(reason.contains("REQUEST_DENIED"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(search.calls(), 0);
}

#[tokio::test]
async fn out_of_range_parameters_are_rejected_before_lookup() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    let business = business();

    for (radius, size) in [(0.0, 5), (10.0, 5), (1.0, 2), (1.0, 10)] {
        let err = h
            .orchestrator
            .run_analysis(&business, &request(&business, radius, size))
            .await
            .unwrap_err();
        assert!(
            matches!(
                err,
                Error::Domain(
                    DomainError::RadiusOutOfRange { .. } | DomainError::GridSizeOutOfRange { .. }
                )
            ),
            "radius {radius} size {size} gave {err:?}"
        );
    }
    assert_eq!(h.search.calls(), 0);
    assert_eq!(h.store.raw_len(), 0);
}

#[tokio::test]
async fn request_for_another_business_is_not_found() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    let business = business();
    let other = Business::new("acme".into(), "Other", None);
    let request = AnalysisRequest::new(other.id.clone(), "dentist", 1.0, 3);

    let err = h
        .orchestrator
        .run_analysis(&business, &request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::BusinessNotFound(_))
    ));
}

// -------------------------------------------------------------------------
// History
// -------------------------------------------------------------------------

#[tokio::test]
async fn history_lists_runs_newest_first() {
    let h = harness(1.0, 3, fast_config(4), middle_row_first);
    let business = business();

    let first = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = h
        .orchestrator
        .run_analysis(&business, &request(&business, 1.0, 3))
        .await
        .unwrap();

    let history = h.orchestrator.get_history(&business.id).await.unwrap();
    let ids: Vec<_> = history.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);
    assert!(history.iter().all(|s| s.points.len() == 9));

    let fetched = h.orchestrator.get_snapshot(&first.id).await.unwrap().unwrap();
    assert_eq!(fetched, first);

    let other = Business::new("acme".into(), "Other", None);
    assert!(h.orchestrator.get_history(&other.id).await.unwrap().is_empty());
}
