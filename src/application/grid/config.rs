//! Grid analysis settings.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::snapshot::{validate_grid_size, validate_radius};
use crate::error::ConfigError;

/// Settings for grid analysis runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Search radius of each probe, in meters.
    #[serde(default = "default_probe_radius_m")]
    pub probe_radius_m: u32,
    /// Time budget of each probe, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Probes in flight at once; 1 samples strictly sequentially.
    #[serde(default = "default_max_concurrent_probes")]
    pub max_concurrent_probes: usize,
    /// Radius used when a caller does not pass one.
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    /// Grid size used when a caller does not pass one.
    #[serde(default = "default_grid_size")]
    pub default_grid_size: u32,
}

const fn default_probe_radius_m() -> u32 {
    500
}

const fn default_probe_timeout_ms() -> u64 {
    5000
}

const fn default_max_concurrent_probes() -> usize {
    4
}

const fn default_radius_km() -> f64 {
    1.0
}

const fn default_grid_size() -> u32 {
    5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            probe_radius_m: default_probe_radius_m(),
            probe_timeout_ms: default_probe_timeout_ms(),
            max_concurrent_probes: default_max_concurrent_probes(),
            default_radius_km: default_radius_km(),
            default_grid_size: default_grid_size(),
        }
    }
}

impl AnalysisConfig {
    /// Per-probe time budget.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Check every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_radius_m == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.probe_radius_m",
                reason: "must be greater than 0".into(),
            });
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.probe_timeout_ms",
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_concurrent_probes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_concurrent_probes",
                reason: "must be at least 1".into(),
            });
        }
        validate_radius(self.default_radius_km).map_err(|e| ConfigError::InvalidValue {
            field: "analysis.default_radius_km",
            reason: e.to_string(),
        })?;
        validate_grid_size(self.default_grid_size).map_err(|e| ConfigError::InvalidValue {
            field: "analysis.default_grid_size",
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
