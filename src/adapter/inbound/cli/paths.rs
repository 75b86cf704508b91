//! Path utilities for gridrank.
//!
//! User-level settings live under `~/.gridrank/`:
//! - `~/.gridrank/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the gridrank home directory (`~/.gridrank/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gridrank")
}

/// Returns the default config file path (`~/.gridrank/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
