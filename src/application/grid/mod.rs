//! Grid ranking analysis.
//!
//! - [`GridAnalysisOrchestrator`] - resolve, plan, sample, score, commit
//! - [`CancelSignal`] - stop a run early while keeping its partial results
//! - [`AnalysisConfig`] - probe radius, timeout and concurrency

pub mod cancel;
pub mod config;
pub mod orchestrator;
pub mod sampler;

pub use cancel::{CancelHandle, CancelSignal};
pub use config::AnalysisConfig;
pub use orchestrator::GridAnalysisOrchestrator;
