//! Gridrank - Geographic grid rank tracking for local search.
//!
//! For a registered business, gridrank lays an N×N grid of coordinates
//! around the business location, issues a keyword search at every point,
//! records where the business ranks, and aggregates the ranks into a
//! visibility score. Each run is persisted as a snapshot so visibility can be
//! tracked over time.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Pure types and math: grid geometry, ranks, scoring, snapshots
//! - **`port`** - Traits the application depends on (places lookup, storage)
//! - **`application`** - Business registry and the grid analysis orchestrator
//! - **`adapter`** - Google Places client, SQLite stores, and the CLI
//! - **`infrastructure`** - Configuration, logging, and wiring
//!
//! # Example
//!
//! ```
//! use gridrank::domain::geo::{generate_grid, Coordinate};
//!
//! let points = generate_grid(Coordinate::new(41.0, 29.0), 1.0, 3);
//! assert_eq!(points.len(), 9);
//! // Row-major, north-west first: the middle point is the center.
//! assert!((points[4].lat - 41.0).abs() < 1e-9);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
