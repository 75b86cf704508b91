//! Outbound adapters (driven side).

pub mod places;
pub mod sqlite;
