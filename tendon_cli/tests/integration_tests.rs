//! Integration tests for the tli binary.
//!
//! These tests verify end-to-end behavior including:
//! - Session file loading (TOML and JSON)
//! - Config defaults and overrides
//! - CSV climb import
//! - Validation failures at the caller boundary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXAMPLE_SESSION: &str = r#"
[bouldering]
mode = "climbs"
v_max = 8
rest_days = 2
avg_rest_between_climbs_sec = 90
climbs = [
    { grade = 6, tut_sec = 25 },
    { grade = 7, tut_sec = 30 },
    { grade = 8, tut_sec = 35 },
]

[[hangboard]]
body_kg = 70
added_kg = 10
edge_mm = 15
grip = "half"
duration_sec = 10
reps = 5
"#;

/// Helper to create a test directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI with an isolated config location
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tli"));
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

#[test]
fn test_cli_help() {
    let dir = setup_test_dir();
    cli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Tendon load index calculator",
        ));
}

#[test]
fn test_boulder_text_output() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);

    cli(&dir)
        .arg("boulder")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bouldering TLI: 37.1"))
        .stdout(predicate::str::contains("Time under tension: 90 s"))
        .stdout(predicate::str::contains("Rest between climbs: 180 s"));
}

#[test]
fn test_boulder_json_output() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);

    let value = json_output(cli(&dir).arg("--json").arg("boulder").arg("-i").arg(&input));

    assert!((value["total"].as_f64().unwrap() - 37.119).abs() < 1e-2);
    assert_eq!(value["total_tut"].as_f64().unwrap(), 90.0);
    assert!((value["freshness_factor"].as_f64().unwrap() - 0.89).abs() < 1e-9);
}

#[test]
fn test_hangboard_output() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);

    cli(&dir)
        .arg("hangboard")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hangboard TLI: 39.0"));

    let value = json_output(cli(&dir).arg("hangboard").arg("--input").arg(&input).arg("--json"));
    assert!((value["total"].as_f64().unwrap() - 39.048).abs() < 1e-2);
    assert_eq!(value["sets"][0]["work_seconds"].as_f64().unwrap(), 50.0);
}

#[test]
fn test_session_with_spike() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);

    // 76.2 against an average of 50: spike, but still a light session
    cli(&dir)
        .arg("session")
        .arg("--input")
        .arg(&input)
        .arg("--average")
        .arg("50")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session TLI: 76.2"))
        .stdout(predicate::str::contains("Spike"))
        .stdout(predicate::str::contains("Recommended rest: 0-2 days"));
}

#[test]
fn test_session_without_history() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);

    let value = json_output(cli(&dir).arg("session").arg("--input").arg(&input).arg("--json"));
    assert_eq!(value["session"]["ratio_to_average"].as_f64().unwrap(), 1.0);
    assert_eq!(value["session"]["spike_warning"].as_bool().unwrap(), false);
    assert_eq!(value["session"]["recommended_rest_days"]["min"].as_u64().unwrap(), 0);
    assert_eq!(value["session"]["recommended_rest_days"]["max"].as_u64().unwrap(), 1);
}

#[test]
fn test_average_from_config() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);
    let config = write_file(&dir, "config.toml", "[session]\nhistorical_average = 50.0\n");

    let value = json_output(
        cli(&dir)
            .arg("--config")
            .arg(&config)
            .arg("session")
            .arg("--input")
            .arg(&input)
            .arg("--json"),
    );
    assert!(value["session"]["spike_warning"].as_bool().unwrap());
}

#[test]
fn test_config_changes_defaults() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);
    let config = write_file(&dir, "config.toml", "[bouldering]\nuse_density = false\n");

    let value = json_output(
        cli(&dir)
            .arg("--config")
            .arg(&config)
            .arg("boulder")
            .arg("--input")
            .arg(&input)
            .arg("--json"),
    );
    assert_eq!(value["density_factor"].as_f64().unwrap(), 1.0);
}

#[test]
fn test_climbs_from_csv() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", EXAMPLE_SESSION);
    let climbs = write_file(&dir, "climbs.csv", "grade,tut_sec\n8,35\n7,30\n6,25\n");

    let from_file = json_output(cli(&dir).arg("boulder").arg("-i").arg(&input).arg("--json"));
    let from_csv = json_output(
        cli(&dir)
            .arg("boulder")
            .arg("-i")
            .arg(&input)
            .arg("--climbs")
            .arg(&climbs)
            .arg("--json"),
    );

    // Same climbs, hardest first: more load under fatigue weighting
    assert_eq!(from_csv["total_tut"], from_file["total_tut"]);
    assert!(from_csv["total"].as_f64().unwrap() > from_file["total"].as_f64().unwrap());
}

#[test]
fn test_grade_mix_json_session() {
    let dir = setup_test_dir();
    let input = write_file(
        &dir,
        "session.json",
        r#"{
            "historical_average": 1200,
            "bouldering": {
                "mode": "grade_mix",
                "v_max": 6,
                "rest_days": 1,
                "total_minutes": 90,
                "work_rest_ratio": 0.25,
                "grades": [{ "grade": 4, "fraction": 70 }, { "grade": 6, "fraction": 30 }]
            }
        }"#,
    );

    let value = json_output(cli(&dir).arg("boulder").arg("--input").arg(&input).arg("--json"));
    assert!((value["total_tut"].as_f64().unwrap() - 1080.0).abs() < 1e-6);
    assert!(value["total"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_invalid_edge_rejected() {
    let dir = setup_test_dir();
    let input = write_file(
        &dir,
        "session.toml",
        &EXAMPLE_SESSION.replace("edge_mm = 15", "edge_mm = 0"),
    );

    cli(&dir)
        .arg("hangboard")
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("edge_mm"));
}

#[test]
fn test_negative_duration_rejected() {
    let dir = setup_test_dir();
    let input = write_file(
        &dir,
        "session.toml",
        &EXAMPLE_SESSION.replace("duration_sec = 10", "duration_sec = -10"),
    );

    for command in ["hangboard", "session"] {
        cli(&dir)
            .arg(command)
            .arg("--input")
            .arg(&input)
            .arg("--json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("duration_sec"))
            .stdout(predicate::str::contains("null").not());
    }
}

#[test]
fn test_boulder_ignores_invalid_hangboard_rows() {
    let dir = setup_test_dir();
    let input = write_file(
        &dir,
        "session.toml",
        &EXAMPLE_SESSION.replace("edge_mm = 15", "edge_mm = 0"),
    );

    cli(&dir)
        .arg("boulder")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bouldering TLI: 37.1"));

    cli(&dir)
        .arg("session")
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("edge_mm"));
}

#[test]
fn test_missing_section_rejected() {
    let dir = setup_test_dir();
    let input = write_file(&dir, "session.toml", "historical_average = 100.0\n");

    cli(&dir)
        .arg("boulder")
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bouldering"));

    cli(&dir)
        .arg("hangboard")
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("hangboard"));
}

#[test]
fn test_csv_with_grade_mix_rejected() {
    let dir = setup_test_dir();
    let input = write_file(
        &dir,
        "session.toml",
        "[bouldering]\nmode = \"grade_mix\"\nv_max = 5\ntotal_minutes = 60\nwork_rest_ratio = 0.5\n",
    );
    let climbs = write_file(&dir, "climbs.csv", "grade,tut_sec\n4,20\n");

    cli(&dir)
        .arg("boulder")
        .arg("--input")
        .arg(&input)
        .arg("--climbs")
        .arg(&climbs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("grade_mix"));
}

#[test]
fn test_config_command_prints_defaults() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("fatigue_rate = 0.02"))
        .stdout(predicate::str::contains("k_edge_exp = 0.45"));
}
