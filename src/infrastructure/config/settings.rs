//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the Places API key is read only
//! from the `GOOGLE_MAPS_API_KEY` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use gridrank::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::places::settings::PlacesConfig;
use crate::application::grid::AnalysisConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every table is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Places web service settings.
    #[serde(default)]
    pub places: PlacesConfig,

    /// Grid analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_database_path() -> String {
    "gridrank.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            places: PlacesConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.places.load_api_key_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Built-in defaults with the API key taken from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.places.load_api_key_from_env();
        config
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first invalid field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.places.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "places.api_url",
            }
            .into());
        }
        let api_url = url::Url::parse(&self.places.api_url).map_err(|e| {
            ConfigError::InvalidValue {
                field: "places.api_url",
                reason: e.to_string(),
            }
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "places.api_url",
                reason: format!("unsupported scheme `{}`", api_url.scheme()),
            }
            .into());
        }
        if self.places.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "places.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.logging.validate()?;
        self.analysis.validate()?;
        Ok(())
    }

    /// Initialize the tracing subscriber from the `[logging]` table.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
