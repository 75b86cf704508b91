//! Fake places collaborators.
//!
//! - [`StaticPlaceLookup`] - Fixed place id → coordinate table, or a
//!   provider that always fails.
//! - [`ScriptedSearch`] - Per-grid-position scripted nearby results with
//!   failures and delays, plus call and concurrency counters.

use std::collections::HashMap;
use std::future::pending;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    geo::{generate_grid, Coordinate},
    id::PlaceId,
};
use crate::error::{Error, Result};
use crate::port::outbound::places::{NearbyPlace, NearbySearch, PlaceDetails, PlaceLookup};

// ---------------------------------------------------------------------------
// StaticPlaceLookup
// ---------------------------------------------------------------------------

/// Place lookup backed by a fixed table.
#[derive(Default)]
pub struct StaticPlaceLookup {
    places: HashMap<PlaceId, PlaceDetails>,
    failure: Option<String>,
}

impl StaticPlaceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `place_id` at `location`.
    pub fn with_place(mut self, place_id: &str, location: Coordinate) -> Self {
        let place_id = PlaceId::new(place_id);
        self.places.insert(
            place_id.clone(),
            PlaceDetails {
                place_id,
                name: Some("Test Business".into()),
                location,
            },
        );
        self
    }

    /// A lookup whose every call fails with a provider error.
    pub fn failing(message: &str) -> Self {
        Self {
            places: HashMap::new(),
            failure: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl PlaceLookup for StaticPlaceLookup {
    async fn get_place_details(&self, place_id: &PlaceId) -> Result<Option<PlaceDetails>> {
        if let Some(message) = &self.failure {
            return Err(Error::Provider(message.clone()));
        }
        Ok(self.places.get(place_id).cloned())
    }

    fn provider_name(&self) -> &'static str {
        "static"
    }
}

// ---------------------------------------------------------------------------
// ScriptedSearch
// ---------------------------------------------------------------------------

/// Scripted answer for one probe.
#[derive(Debug, Clone)]
pub enum Probe {
    /// Return these results immediately.
    Results(Vec<NearbyPlace>),
    /// Fail with a provider error.
    Fail(String),
    /// Return these results after a delay.
    Delayed(Duration, Vec<NearbyPlace>),
    /// Never answer.
    Hang,
}

type Script = dyn Fn(usize) -> Probe + Send + Sync;

/// Nearby search answering by grid position.
///
/// The planned grid is regenerated from the same center, radius and size the
/// orchestrator uses, so each probed coordinate maps back to its row-major
/// position exactly.
pub struct ScriptedSearch {
    plan: Vec<Coordinate>,
    script: Box<Script>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedSearch {
    /// Script answers for the grid of `grid_size` around `center`.
    pub fn for_grid<F>(center: Coordinate, radius_km: f64, grid_size: u32, script: F) -> Self
    where
        F: Fn(usize) -> Probe + Send + Sync + 'static,
    {
        Self {
            plan: generate_grid(center, radius_km, grid_size),
            script: Box::new(script),
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of probes issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of probes observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn position_of(&self, location: Coordinate) -> Option<usize> {
        self.plan.iter().position(|c| *c == location)
    }
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl NearbySearch for ScriptedSearch {
    async fn search_nearby(
        &self,
        location: Coordinate,
        _keyword: &str,
        _radius_meters: u32,
    ) -> Result<Vec<NearbyPlace>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(Arc::clone(&self.in_flight));

        let Some(position) = self.position_of(location) else {
            return Err(Error::Provider(format!("unplanned coordinate {location}")));
        };

        match (self.script)(position) {
            Probe::Results(results) => Ok(results),
            Probe::Fail(message) => Err(Error::Provider(message)),
            Probe::Delayed(delay, results) => {
                tokio::time::sleep(delay).await;
                Ok(results)
            }
            Probe::Hang => pending().await,
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Result builders
// ---------------------------------------------------------------------------

/// Results placing `target` at 1-based `rank`, preceded by competitors
/// named `Competitor 1`, `Competitor 2`, ...
pub fn ranked(target: &str, rank: usize) -> Vec<NearbyPlace> {
    let mut results = competitors(rank.saturating_sub(1));
    results.push(NearbyPlace::new(target, "Target"));
    results
}

/// `n` competitor results, none of them the target.
pub fn competitors(n: usize) -> Vec<NearbyPlace> {
    (1..=n)
        .map(|i| NearbyPlace::new(format!("competitor-{i}"), format!("Competitor {i}")))
        .collect()
}
