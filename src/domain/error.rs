//! Domain validation errors.
//!
//! These errors are returned when caller-supplied analysis parameters fall
//! outside the accepted bounds. They are raised before any external call or
//! persistence happens.
//!
//! # Examples
//!
//! ```
//! use gridrank::domain::error::DomainError;
//! use gridrank::domain::id::BusinessId;
//! use gridrank::domain::snapshot::AnalysisRequest;
//!
//! let request = AnalysisRequest::new(BusinessId::new(), "dentist", 12.0, 5);
//! assert!(matches!(
//!     request.validate(),
//!     Err(DomainError::RadiusOutOfRange { .. })
//! ));
//! ```

use thiserror::Error;

/// Errors that occur when analysis inputs violate domain rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Radius must lie strictly between the configured bounds.
    #[error("radius must be greater than {min} and less than {max} km, got {radius_km}")]
    RadiusOutOfRange {
        /// The rejected radius.
        radius_km: f64,
        /// Exclusive lower bound.
        min: f64,
        /// Exclusive upper bound.
        max: f64,
    },

    /// Grid size must lie within the inclusive bounds.
    #[error("grid size must be between {min} and {max}, got {grid_size}")]
    GridSizeOutOfRange {
        /// The rejected grid size.
        grid_size: u32,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },

    /// Keyword must contain at least one non-whitespace character.
    #[error("keyword cannot be empty")]
    EmptyKeyword,
}
