//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::places::settings::API_KEY_ENV;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!("2. Set {API_KEY_ENV} in the environment"));
    output::note("3. Register a business: gridrank business add --tenant <id> --name <name> --place-id <id>");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "database": config.database,
            "logging": { "level": config.logging.level, "format": config.logging.format },
            "places": {
                "api_url": config.places.api_url,
                "timeout_ms": config.places.timeout_ms,
                "connect_timeout_ms": config.places.connect_timeout_ms,
                "retry_max_attempts": config.places.retry_max_attempts,
                "retry_backoff_ms": config.places.retry_backoff_ms,
                "api_key_loaded": config.places.api_key.is_some(),
            },
            "analysis": {
                "probe_radius_m": config.analysis.probe_radius_m,
                "probe_timeout_ms": config.analysis.probe_timeout_ms,
                "max_concurrent_probes": config.analysis.max_concurrent_probes,
                "default_radius_km": config.analysis.default_radius_km,
                "default_grid_size": config.analysis.default_grid_size,
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Database", &config.database);
    output::field(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );

    output::section("Places");
    output::field("API", &config.places.api_url);
    output::field("Timeout", format!("{}ms", config.places.timeout_ms));
    output::field(
        "Retries",
        format!(
            "{} attempts, {}ms backoff",
            config.places.retry_max_attempts, config.places.retry_backoff_ms
        ),
    );
    if config.places.api_key.is_some() {
        output::success(&format!("API key loaded from {API_KEY_ENV}"));
    } else {
        output::warning(&format!("API key not set ({API_KEY_ENV})"));
    }

    output::section("Analysis");
    output::field("Probe radius", format!("{}m", config.analysis.probe_radius_m));
    output::field(
        "Probe timeout",
        format!("{}ms", config.analysis.probe_timeout_ms),
    );
    output::field("Concurrency", config.analysis.max_concurrent_probes);
    output::field(
        "Default grid",
        format!(
            "{n}x{n} over {:.2} km",
            config.analysis.default_radius_km,
            n = config.analysis.default_grid_size
        ),
    );
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "api_key_loaded": config.places.api_key.is_some(),
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");
    if config.places.api_key.is_none() {
        output::warning(&format!(
            "{API_KEY_ENV} is not set; analyses will fail until it is"
        ));
    }
    output::field(
        "Next",
        format!("gridrank config show -c {}", path.display()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn template_parses_as_valid_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.database, "gridrank.db");
        assert_eq!(config.analysis.default_grid_size, 5);
    }

    #[test]
    fn init_writes_template_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        execute_init(&path, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "existing").unwrap();

        let err = execute_init(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        execute_init(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn validate_reports_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[analysis]\nmax_concurrent_probes = 0\n").unwrap();

        let err = execute_validate(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidValue { .. })));
    }
}
