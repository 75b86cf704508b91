//! Provider-agnostic domain logic.
//!
//! Pure types and functions with no I/O: grid geometry, rank scoring, and
//! the snapshot model the rest of the crate persists and reports.

pub mod business;
pub mod error;
pub mod geo;
pub mod id;
pub mod score;
pub mod snapshot;

// Core domain types
pub use business::Business;
pub use geo::{generate_grid, Coordinate};
pub use id::{BusinessId, PlaceId, PointId, SnapshotId, TenantId};
pub use score::{calculate_visibility_score, Rank, SEARCH_DEPTH};
pub use snapshot::{
    AnalysisRequest, GridPoint, GridSnapshot, PointMetadata, ProbeOutcome, SnapshotStatus,
};
