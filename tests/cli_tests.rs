//! CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gridrank(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("gridrank");
    cmd.env("HOME", home).env_remove("GOOGLE_MAPS_API_KEY");
    cmd
}

/// Config pointing at a database inside `dir`.
fn write_config(dir: &TempDir) -> PathBuf {
    let db = dir.path().join("cli.db");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!(
            "database = \"{}\"\n\n[logging]\nlevel = \"warn\"\n",
            db.to_string_lossy()
        ),
    )
    .expect("write temp config");
    path
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run gridrank");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    gridrank(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("business"));
}

#[test]
fn grid_preview_prints_every_point() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(gridrank(dir.path()).args([
        "--json",
        "grid",
        "preview",
        "--lat",
        "41.0",
        "--lng",
        "29.0",
        "--radius-km",
        "1.0",
        "--grid-size",
        "3",
    ]));

    let points = value["points"].as_array().unwrap();
    assert_eq!(points.len(), 9);
    assert!((points[4]["lat"].as_f64().unwrap() - 41.0).abs() < 1e-9);
    assert!(points[0]["lat"].as_f64().unwrap() > 41.0);
}

#[test]
fn grid_preview_rejects_out_of_range_size() {
    let dir = tempfile::tempdir().unwrap();
    gridrank(dir.path())
        .args(["grid", "preview", "--lat", "41.0", "--lng", "29.0", "--grid-size", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grid size"));
}

#[test]
fn config_validate_accepts_a_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    gridrank(dir.path())
        .args(["config", "validate", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));
}

#[test]
fn config_validate_fails_on_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[analysis]\ndefault_grid_size = 42\n").unwrap();

    gridrank(dir.path())
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("analysis.default_grid_size"));
}

#[test]
fn config_init_writes_default_location() {
    let dir = tempfile::tempdir().unwrap();
    gridrank(dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    let written = dir.path().join(".gridrank").join("config.toml");
    assert!(written.exists());
    gridrank(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn business_add_then_list_by_tenant() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);

    let added = json_stdout(
        gridrank(dir.path())
            .args(["--json", "business", "add", "--tenant", "acme", "--name", "Smile Dental"])
            .args(["--place-id", "ChIJ-smile"])
            .arg("--config")
            .arg(&config),
    );
    assert_eq!(added["command"], "business.add");
    let id = added["business"]["id"].as_str().unwrap().to_string();

    json_stdout(
        gridrank(dir.path())
            .args(["--json", "business", "add", "--tenant", "globex", "--name", "Other"])
            .arg("--config")
            .arg(&config),
    );

    let listed = json_stdout(
        gridrank(dir.path())
            .args(["--json", "business", "list", "--tenant", "acme"])
            .arg("--config")
            .arg(&config),
    );
    let businesses = listed["businesses"].as_array().unwrap();
    assert_eq!(businesses.len(), 1);
    assert_eq!(businesses[0]["id"], id.as_str());
    assert_eq!(businesses[0]["place_id"], "ChIJ-smile");

    let history = json_stdout(
        gridrank(dir.path())
            .args(["--json", "history", id.as_str()])
            .arg("--config")
            .arg(&config),
    );
    assert_eq!(history["snapshots"].as_array().unwrap().len(), 0);
}

#[test]
fn analyze_without_api_key_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    let added = json_stdout(
        gridrank(dir.path())
            .args(["--json", "business", "add", "--tenant", "acme", "--name", "Smile Dental"])
            .args(["--place-id", "ChIJ-smile"])
            .arg("--config")
            .arg(&config),
    );
    let id = added["business"]["id"].as_str().unwrap().to_string();

    gridrank(dir.path())
        .args(["analyze", id.as_str(), "--keyword", "dentist", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_MAPS_API_KEY"));
}

#[test]
fn history_for_unknown_business_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    gridrank(dir.path())
        .args(["history", "no-such-business", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("business not found"));
}

#[test]
fn remove_with_wrong_tenant_keeps_business() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    let added = json_stdout(
        gridrank(dir.path())
            .args(["--json", "business", "add", "--tenant", "acme", "--name", "Smile Dental"])
            .arg("--config")
            .arg(&config),
    );
    let id = added["business"]["id"].as_str().unwrap().to_string();

    gridrank(dir.path())
        .args(["business", "remove", id.as_str(), "--tenant", "globex", "--config"])
        .arg(&config)
        .assert()
        .failure();

    gridrank(dir.path())
        .args(["business", "remove", id.as_str(), "--tenant", "acme", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed business"));
}
