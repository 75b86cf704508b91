//! Rank observations and visibility scoring.
//!
//! A grid point's [`Rank`] is the 1-based position of the tracked business
//! among the results of a nearby search, or [`Rank::NotFound`] when it did
//! not appear within the first [`SEARCH_DEPTH`] results.
//!
//! # Scoring
//!
//! Each rank contributes a weight on a linear decay: rank 1 is worth 100,
//! every following position 5 less, rank 20 is worth 5. Anything outside the
//! scored band contributes nothing. The visibility score is the mean weight
//! on a 0-100 scale, rounded to one decimal place.
//!
//! # Examples
//!
//! ```
//! use gridrank::domain::score::{calculate_visibility_score, Rank};
//!
//! let ranks = [Rank::at(1), Rank::at(1), Rank::NotFound];
//! assert_eq!(calculate_visibility_score(&ranks), 66.7);
//! assert_eq!(calculate_visibility_score(&[]), 0.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of search results inspected per probe.
///
/// Ranks beyond this depth are indistinguishable from "not found". The
/// not-found sentinel and the scorer's band are both derived from it.
pub const SEARCH_DEPTH: u32 = 20;

/// Scored value standing in for "not found": one past the deepest rank.
pub const NOT_FOUND_VALUE: u32 = SEARCH_DEPTH + 1;

/// Weight of a rank-1 observation; also the per-point maximum.
const MAX_WEIGHT: f64 = 100.0;

/// Weight lost per position below rank 1.
const WEIGHT_DECAY: f64 = 5.0;

/// Position of a business within one probe's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Found at this 1-based position (1..=`SEARCH_DEPTH`).
    Position(u32),
    /// Not present in the inspected results.
    NotFound,
}

impl Rank {
    /// Build a rank from a 1-based position.
    ///
    /// Positions of 0 or deeper than [`SEARCH_DEPTH`] are treated as not found.
    #[must_use]
    pub const fn at(position: u32) -> Self {
        if position == 0 || position > SEARCH_DEPTH {
            Self::NotFound
        } else {
            Self::Position(position)
        }
    }

    /// Build a rank from a 0-based index into a result list.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .map_or(Self::NotFound, Self::at)
    }

    /// Build a rank from a stored nullable position.
    #[must_use]
    pub fn from_stored(position: Option<i32>) -> Self {
        position
            .and_then(|p| u32::try_from(p).ok())
            .map_or(Self::NotFound, Self::at)
    }

    /// The 1-based position, if found.
    #[must_use]
    pub const fn position(self) -> Option<u32> {
        match self {
            Self::Position(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// True when the business was the top result.
    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::Position(1))
    }

    /// True when the business did not appear.
    #[must_use]
    pub const fn is_not_found(self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Value used for averaging; not found counts as [`NOT_FOUND_VALUE`].
    #[must_use]
    pub const fn scored_value(self) -> u32 {
        match self {
            Self::Position(p) => p,
            Self::NotFound => NOT_FOUND_VALUE,
        }
    }

    /// Visibility weight of this observation (0-100).
    #[must_use]
    pub fn weight(self) -> f64 {
        weight_for_position(self.scored_value())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(p) => write!(f, "#{p}"),
            Self::NotFound => write!(f, "-"),
        }
    }
}

/// Weight for a raw position: `max(0, 105 - 5r)` inside `1..=SEARCH_DEPTH`, else 0.
#[must_use]
pub fn weight_for_position(position: u32) -> f64 {
    if position == 0 || position > SEARCH_DEPTH {
        return 0.0;
    }
    (MAX_WEIGHT + WEIGHT_DECAY - WEIGHT_DECAY * f64::from(position)).max(0.0)
}

/// Mean weight of `ranks` on a 0-100 scale, rounded to one decimal.
///
/// Returns exactly 0.0 for an empty input.
#[must_use]
pub fn calculate_visibility_score(ranks: &[Rank]) -> f64 {
    if ranks.is_empty() {
        return 0.0;
    }

    let total: f64 = ranks.iter().map(|r| r.weight()).sum();
    let max_total = ranks.len() as f64 * MAX_WEIGHT;
    round_one_decimal(total / max_total * 100.0)
}

/// Arithmetic mean of the scored values, not found counting as [`NOT_FOUND_VALUE`].
///
/// An empty input yields the worst-case floor.
#[must_use]
pub fn average_rank(ranks: &[Rank]) -> f64 {
    if ranks.is_empty() {
        return f64::from(NOT_FOUND_VALUE);
    }
    let sum: f64 = ranks.iter().map(|r| f64::from(r.scored_value())).sum();
    sum / ranks.len() as f64
}

// Exact halves go to the even neighbour, so 1.25 becomes 1.2.
fn round_one_decimal(value: f64) -> f64 {
    let scaled = value * 10.0;
    let mut rounded = scaled.round();
    if (rounded - scaled).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded -= scaled.signum();
    }
    rounded / 10.0
}
