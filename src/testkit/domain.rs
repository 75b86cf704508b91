//! Builders for domain values used across tests.

use crate::application::grid::AnalysisConfig;
use crate::domain::{
    business::Business,
    geo::Coordinate,
    id::{PlaceId, TenantId},
    snapshot::AnalysisRequest,
};

/// Place id every test business is registered under.
pub const TARGET_PLACE: &str = "target-place";

/// Istanbul city center.
pub const CENTER: Coordinate = Coordinate::new(41.0, 29.0);

/// A business owned by tenant `acme` with place id [`TARGET_PLACE`].
pub fn business() -> Business {
    Business::new(
        TenantId::new("acme"),
        "Test Dental",
        Some(PlaceId::new(TARGET_PLACE)),
    )
}

/// A business with no external place id.
pub fn business_without_place() -> Business {
    Business::new(TenantId::new("acme"), "Unlisted", None)
}

/// A `dentist` request for `business`.
pub fn request(business: &Business, radius_km: f64, grid_size: u32) -> AnalysisRequest {
    AnalysisRequest::new(business.id.clone(), "dentist", radius_km, grid_size)
}

/// Analysis settings with a short probe budget.
pub fn fast_config(max_concurrent_probes: usize) -> AnalysisConfig {
    AnalysisConfig {
        probe_timeout_ms: 200,
        max_concurrent_probes,
        ..AnalysisConfig::default()
    }
}
