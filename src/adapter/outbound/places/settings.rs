//! Google Places client configuration.

use serde::Deserialize;

/// Environment variable holding the Places API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Places web service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesConfig {
    /// Base URL of the Places JSON web service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// API key, loaded from the environment only.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_api_url() -> String {
    "https://maps.googleapis.com/maps/api/place".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5000
}

const fn default_retry_max_attempts() -> u32 {
    2
}

const fn default_retry_backoff_ms() -> u64 {
    250
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            api_key: None,
        }
    }
}

impl PlacesConfig {
    /// Fill `api_key` from [`API_KEY_ENV`] when set and non-empty.
    pub fn load_api_key_from_env(&mut self) {
        self.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }
}
