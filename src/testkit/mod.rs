//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`places`] - Fake [`PlaceLookup`](crate::port::PlaceLookup) and
//!   [`NearbySearch`](crate::port::NearbySearch): `StaticPlaceLookup`,
//!   `ScriptedSearch`.
//! - [`store`] - In-memory stores with failure injection.
//! - [`domain`] - Builders for businesses, requests and configs.

pub mod domain;
pub mod places;
pub mod store;
