use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::{BusinessId, SnapshotId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Grid analysis errors surfaced to the caller.
///
/// Probe failures never appear here; they degrade to "not found" points.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("business not found: {0}")]
    BusinessNotFound(BusinessId),

    #[error("cannot locate business {business_id}: no place id is registered")]
    MissingPlaceId { business_id: BusinessId },

    #[error("cannot locate business {business_id}: {reason}")]
    Unresolvable {
        business_id: BusinessId,
        reason: String,
    },

    #[error("failed to persist snapshot {snapshot_id}: {reason}")]
    Persistence {
        snapshot_id: SnapshotId,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("places provider error: {0}")]
    Provider(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
