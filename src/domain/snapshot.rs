//! Grid analysis snapshots and their sampled points.
//!
//! - [`AnalysisRequest`] - Caller-supplied parameters with bounds validation
//! - [`GridSnapshot`] - One execution of a grid analysis
//! - [`GridPoint`] - One sampled coordinate with its rank outcome
//!
//! A snapshot starts as a `Pending` shell (parameters and center only) and is
//! finalized exactly once with its full point set. A finalized snapshot always
//! carries `grid_size * grid_size` points in row-major order.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::geo::{grid_cell, Coordinate};
use super::id::{BusinessId, PointId, SnapshotId};
use super::score::{average_rank, calculate_visibility_score, Rank};

/// Exclusive lower bound for the analysis radius.
pub const MIN_RADIUS_KM: f64 = 0.0;
/// Exclusive upper bound for the analysis radius.
pub const MAX_RADIUS_KM: f64 = 10.0;
/// Smallest accepted grid resolution.
pub const MIN_GRID_SIZE: u32 = 3;
/// Largest accepted grid resolution.
pub const MAX_GRID_SIZE: u32 = 9;

/// Parameters of one grid analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Business to analyze.
    pub business_id: BusinessId,
    /// Search keyword issued at every grid point.
    pub keyword: String,
    /// Distance from the center to the grid edge, in kilometers.
    pub radius_km: f64,
    /// Points per grid side.
    pub grid_size: u32,
}

impl AnalysisRequest {
    /// Create a new analysis request.
    pub fn new(
        business_id: BusinessId,
        keyword: impl Into<String>,
        radius_km: f64,
        grid_size: u32,
    ) -> Self {
        Self {
            business_id,
            keyword: keyword.into(),
            radius_km,
            grid_size,
        }
    }

    /// Check the request against the accepted bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] naming the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_radius(self.radius_km)?;
        validate_grid_size(self.grid_size)?;
        if self.keyword.trim().is_empty() {
            return Err(DomainError::EmptyKeyword);
        }
        Ok(())
    }

    /// Number of points a run with this request samples.
    #[must_use]
    pub const fn point_count(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }
}

/// Check that a radius lies strictly within `(MIN_RADIUS_KM, MAX_RADIUS_KM)`.
///
/// # Errors
///
/// Returns [`DomainError::RadiusOutOfRange`] otherwise (including NaN).
pub fn validate_radius(radius_km: f64) -> Result<(), DomainError> {
    if radius_km > MIN_RADIUS_KM && radius_km < MAX_RADIUS_KM {
        Ok(())
    } else {
        Err(DomainError::RadiusOutOfRange {
            radius_km,
            min: MIN_RADIUS_KM,
            max: MAX_RADIUS_KM,
        })
    }
}

/// Check that a grid size lies within `MIN_GRID_SIZE..=MAX_GRID_SIZE`.
///
/// # Errors
///
/// Returns [`DomainError::GridSizeOutOfRange`] otherwise.
pub fn validate_grid_size(grid_size: u32) -> Result<(), DomainError> {
    if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
        Ok(())
    } else {
        Err(DomainError::GridSizeOutOfRange {
            grid_size,
            min: MIN_GRID_SIZE,
            max: MAX_GRID_SIZE,
        })
    }
}

/// How a single grid point's probe ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The search returned (possibly empty) results.
    Ok,
    /// The search failed; the point is recorded as not found.
    Failed,
    /// The search exceeded its time budget; recorded as not found.
    TimedOut,
    /// The run was cancelled before this point was probed.
    Skipped,
}

impl ProbeOutcome {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
            Self::Skipped => "skipped",
        }
    }
}

/// Typed per-point metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointMetadata {
    /// Number of results the probe returned.
    pub result_count: u32,
    /// How the probe ended.
    pub outcome: ProbeOutcome,
}

impl PointMetadata {
    /// Metadata for a successful probe with `result_count` results.
    #[must_use]
    pub const fn ok(result_count: u32) -> Self {
        Self {
            result_count,
            outcome: ProbeOutcome::Ok,
        }
    }

    /// Metadata for a probe that produced no data.
    #[must_use]
    pub const fn without_results(outcome: ProbeOutcome) -> Self {
        Self {
            result_count: 0,
            outcome,
        }
    }
}

/// One sampled coordinate within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Unique identifier.
    pub id: PointId,
    /// Zero-based row-major index within the grid.
    pub position: u32,
    /// Sampled coordinate.
    pub coordinate: Coordinate,
    /// Observed rank of the business at this point.
    pub rank: Rank,
    /// Top result's name when the business is not itself the top result.
    pub competitor_winner: Option<String>,
    /// Probe details.
    pub metadata: PointMetadata,
}

impl GridPoint {
    /// `(row, col)` of this point in a grid of `grid_size` per side.
    #[must_use]
    pub const fn cell(&self, grid_size: u32) -> (u32, u32) {
        grid_cell(self.position, grid_size)
    }
}

/// Lifecycle state of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    /// Shell written, sampling in progress. Never returned by history.
    Pending,
    /// Every point was probed.
    Complete,
    /// The caller cancelled; unprobed points are recorded as skipped.
    Cancelled,
}

impl SnapshotStatus {
    /// Stable lowercase label used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a stored label.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "complete" => Some(Self::Complete),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// True for states that carry a full point set.
    #[must_use]
    pub const fn is_committed(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One execution of a grid analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Unique identifier.
    pub id: SnapshotId,
    /// Analyzed business.
    pub business_id: BusinessId,
    /// Search keyword.
    pub keyword: String,
    /// Requested radius in kilometers.
    pub radius_km: f64,
    /// Requested points per grid side.
    pub grid_size: u32,
    /// Business coordinate resolved at analysis time.
    pub center: Coordinate,
    /// Mean scored rank, set when finalized.
    pub average_rank: Option<f64>,
    /// Visibility score (0-100), set when finalized.
    pub visibility_score: Option<f64>,
    /// Lifecycle state.
    pub status: SnapshotStatus,
    /// When the shell was created.
    pub created_at: DateTime<Utc>,
    /// When the snapshot was finalized.
    pub completed_at: Option<DateTime<Utc>>,
    /// Sampled points in row-major order; empty while pending.
    pub points: Vec<GridPoint>,
}

impl GridSnapshot {
    /// Create a pending shell for `request` centered on `center`.
    #[must_use]
    pub fn pending(request: &AnalysisRequest, center: Coordinate) -> Self {
        Self {
            id: SnapshotId::new(),
            business_id: request.business_id.clone(),
            keyword: request.keyword.clone(),
            radius_km: request.radius_km,
            grid_size: request.grid_size,
            center,
            average_rank: None,
            visibility_score: None,
            status: SnapshotStatus::Pending,
            // Storage keeps microseconds; truncate so reads compare equal.
            created_at: Utc::now().trunc_subsecs(6),
            completed_at: None,
            points: Vec::new(),
        }
    }

    /// Finalize the shell with its sampled points and computed aggregates.
    ///
    /// Points are sorted into row-major order before aggregation.
    #[must_use]
    pub fn finalize(mut self, mut points: Vec<GridPoint>, status: SnapshotStatus) -> Self {
        points.sort_by_key(|p| p.position);
        let ranks: Vec<Rank> = points.iter().map(|p| p.rank).collect();

        self.average_rank = Some(average_rank(&ranks));
        self.visibility_score = Some(calculate_visibility_score(&ranks));
        self.status = status;
        self.completed_at = Some(Utc::now().trunc_subsecs(6));
        self.points = points;
        self
    }

    /// Number of points a committed snapshot must carry.
    #[must_use]
    pub const fn expected_point_count(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }

    /// True when the point set matches the grid resolution.
    #[must_use]
    pub fn has_full_point_set(&self) -> bool {
        self.points.len() == self.expected_point_count()
    }

    /// Rank outcomes in row-major order.
    #[must_use]
    pub fn ranks(&self) -> Vec<Rank> {
        self.points.iter().map(|p| p.rank).collect()
    }

    /// Point at `(row, col)`, if present.
    #[must_use]
    pub fn point_at(&self, row: u32, col: u32) -> Option<&GridPoint> {
        if row >= self.grid_size || col >= self.grid_size {
            return None;
        }
        let position = row * self.grid_size + col;
        self.points.iter().find(|p| p.position == position)
    }

    /// Number of points where the business was found.
    #[must_use]
    pub fn found_count(&self) -> usize {
        self.points.iter().filter(|p| !p.rank.is_not_found()).count()
    }
}
