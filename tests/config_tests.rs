use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use gridrank::application::grid::AnalysisConfig;
use gridrank::error::{ConfigError, Error};
use gridrank::infrastructure::config::settings::Config;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("gridrank-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

fn load(contents: &str) -> Result<Config, Error> {
    let path = write_temp_config(contents);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);
    result
}

#[test]
fn config_loads_full_file() {
    let config = load(
        r#"
database = "ranks.db"

[logging]
level = "gridrank=debug,reqwest=warn"
format = "json"

[places]
api_url = "https://example.test/place/"
timeout_ms = 2500

[analysis]
probe_radius_m = 300
probe_timeout_ms = 1500
max_concurrent_probes = 8
default_radius_km = 2.5
default_grid_size = 7
"#,
    )
    .unwrap();

    assert_eq!(config.database, "ranks.db");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.places.timeout_ms, 2500);
    assert_eq!(
        config.analysis,
        AnalysisConfig {
            probe_radius_m: 300,
            probe_timeout_ms: 1500,
            max_concurrent_probes: 8,
            default_radius_km: 2.5,
            default_grid_size: 7,
        }
    );
}

#[test]
fn config_rejects_unknown_log_format() {
    match load("[logging]\nformat = \"xml\"\n") {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
            assert_eq!(field, "logging.format");
        }
        Err(err) => panic!("Expected invalid log format error, got {err}"),
        Ok(_) => panic!("Expected xml log format to be rejected"),
    }
}

#[test]
fn config_rejects_default_radius_outside_bounds() {
    for radius in ["0.0", "10.0", "-3.0"] {
        let result = load(&format!("[analysis]\ndefault_radius_km = {radius}\n"));
        assert!(
            matches!(
                result,
                Err(Error::Config(ConfigError::InvalidValue {
                    field: "analysis.default_radius_km",
                    ..
                }))
            ),
            "radius {radius} should be rejected"
        );
    }
}

#[test]
fn config_rejects_zero_probe_timeout() {
    let result = load("[analysis]\nprobe_timeout_ms = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "analysis.probe_timeout_ms",
            ..
        }))
    ));
}

#[test]
fn config_rejects_wrong_types() {
    let result = load("[analysis]\ndefault_grid_size = \"five\"\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn config_missing_file_is_read_error() {
    let result = Config::load("/definitely/not/here/gridrank.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}
