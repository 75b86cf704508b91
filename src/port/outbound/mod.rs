//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the maps provider
//! and durable storage.

pub mod places;
pub mod store;
