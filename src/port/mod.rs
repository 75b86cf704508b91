//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (maps provider, database).
//!
//! # Architecture
//!
//! ```text
//!                    ┌──────────────────────────┐
//!                    │       Application        │
//!                    │ GridAnalysisOrchestrator │
//!                    └──────────────────────────┘
//!                        │                  │
//!                        ▼                  ▼
//!                 ┌─────────────┐    ┌─────────────┐
//!                 │   Places    │    │    Store    │
//!                 │   Adapter   │    │   Adapter   │
//!                 └─────────────┘    └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`PlaceLookup`], [`NearbySearch`] - Maps provider integration
//! - [`SnapshotStore`], [`BusinessStore`] - Persistence

pub mod outbound;

pub use outbound::places::{NearbyPlace, NearbySearch, PlaceDetails, PlaceLookup};
pub use outbound::store::{BusinessStore, SnapshotStore};
