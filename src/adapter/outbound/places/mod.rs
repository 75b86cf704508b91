//! Google Places adapter.
//!
//! Implements [`PlaceLookup`](crate::port::PlaceLookup) and
//! [`NearbySearch`](crate::port::NearbySearch) against the Places JSON web
//! service.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::GooglePlacesClient;
pub use settings::PlacesConfig;
