//! Places provider ports for place resolution and nearby search.
//!
//! These traits are the integration points with the external maps provider.
//! The grid orchestrator resolves a business coordinate through
//! [`PlaceLookup`] and probes each grid point through [`NearbySearch`].

use async_trait::async_trait;

use crate::domain::{geo::Coordinate, id::PlaceId};
use crate::error::Error;

/// Details of a resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    /// Provider place id.
    pub place_id: PlaceId,
    /// Display name, if the provider returned one.
    pub name: Option<String>,
    /// Place coordinate.
    pub location: Coordinate,
}

/// One result of a nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    /// Provider place id.
    pub place_id: PlaceId,
    /// Display name.
    pub name: String,
    /// Average rating, if available.
    pub rating: Option<f64>,
    /// Number of ratings, if available.
    pub user_ratings_total: Option<u32>,
}

impl NearbyPlace {
    /// Create a result with just an id and name.
    pub fn new(place_id: impl Into<PlaceId>, name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            rating: None,
            user_ratings_total: None,
        }
    }
}

/// Resolves provider place ids to coordinates.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Fetch details for `place_id`.
    ///
    /// Returns `Ok(None)` when the provider does not know the place or
    /// returns it without a coordinate.
    async fn get_place_details(&self, place_id: &PlaceId) -> Result<Option<PlaceDetails>, Error>;

    /// Get the provider name for logging/debugging.
    fn provider_name(&self) -> &'static str;
}

/// Issues keyword searches around a coordinate.
#[async_trait]
pub trait NearbySearch: Send + Sync {
    /// Search for `keyword` within `radius_meters` of `location`.
    ///
    /// Results are ordered by the provider's relevance ranking, so a
    /// result's rank is its index plus one. An empty list is a valid answer.
    async fn search_nearby(
        &self,
        location: Coordinate,
        keyword: &str,
        radius_meters: u32,
    ) -> Result<Vec<NearbyPlace>, Error>;

    /// Get the provider name for logging/debugging.
    fn provider_name(&self) -> &'static str;
}
