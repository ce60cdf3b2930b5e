//! CLI integration tests for the cropyield binary.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

// ============================================================================
// Helper Functions
// ============================================================================

fn demo_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/yield_data.csv")
}

/// A cropyield command isolated from the caller's environment.
fn cropyield_bare() -> Command {
    let mut cmd = Command::cargo_bin("cropyield").expect("Failed to find cropyield binary");
    cmd.env("NO_COLOR", "1")
        .env_remove("CROPYIELD_SEED")
        .env_remove("CROPYIELD_SPLIT_FRACTION")
        .env_remove("CROPYIELD_DATA_PATH")
        .env_remove("RUST_LOG");
    cmd
}

/// A cropyield command reading the demo dataset.
fn cropyield() -> Command {
    let mut cmd = cropyield_bare();
    cmd.arg("--data").arg(demo_data());
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// explore
// ============================================================================

#[test]
fn test_explore_prints_statistics() {
    cropyield()
        .arg("explore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Records"))
        .stdout(predicate::str::contains("10 rows x 7 columns"))
        .stdout(predicate::str::contains("11.45 tons/ha"));
}

#[test]
fn test_explore_json() {
    let v = json_stdout(cropyield().args(["explore", "--json"]));
    assert_eq!(v["rows"], 10);
    assert_eq!(v["columns"], 7);
    assert_eq!(v["summary"]["max_yield"], 11.449);
    assert_eq!(v["input_bounds"]["nitrogen"]["max"], 200.0);
    assert_eq!(v["input_bounds"]["avg_temp"]["step"], 0.1);
}

#[test]
fn test_explore_lists_prediction_inputs() {
    cropyield()
        .arg("explore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prediction Inputs"))
        .stdout(predicate::str::contains("610 to 900 mm (step 1)"));
}

// ============================================================================
// train
// ============================================================================

#[test]
fn test_train_reports_metrics_and_coefficients() {
    cropyield()
        .arg("train")
        .assert()
        .success()
        .stdout(predicate::str::contains("R² Score (test)"))
        .stdout(predicate::str::contains("RMSE (test)"))
        .stdout(predicate::str::contains("Impact per kg/ha Nitrogen"))
        .stdout(predicate::str::contains("Actual vs Predicted").not());
}

#[test]
fn test_train_json_report() {
    let v = json_stdout(cropyield().args(["train", "--json"]));
    assert_eq!(v["report"]["n_train"], 8);
    assert_eq!(v["report"]["n_test"], 2);
    assert!(v["report"]["r2_test"].as_f64().unwrap() > 0.9);
    assert_eq!(v["coefficients"].as_array().unwrap().len(), 3);
    assert!(v.get("test_predictions").is_none());
}

#[test]
fn test_train_show_test_lists_rows() {
    let v = json_stdout(cropyield().args(["train", "--json", "--show-test"]));
    assert_eq!(v["test_predictions"].as_array().unwrap().len(), 2);

    cropyield()
        .args(["train", "--show-test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Actual vs Predicted"));
}

#[test]
fn test_train_is_reproducible_and_env_seed_matches_flag() {
    let a = json_stdout(cropyield().args(["train", "--json", "--seed", "7"]));
    let b = json_stdout(cropyield().args(["train", "--json", "--seed", "7"]));
    assert_eq!(a, b);

    let from_env = json_stdout(
        cropyield()
            .env("CROPYIELD_SEED", "7")
            .args(["train", "--json"]),
    );
    assert_eq!(a, from_env);
}

#[test]
fn test_config_file_sets_split_fraction() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("cropyield.toml");
    std::fs::write(&config, "split_fraction = 0.3\n").unwrap();

    let v = json_stdout(cropyield().arg("--config").arg(&config).args(["train", "--json"]));
    assert_eq!(v["report"]["n_test"], 3);
    assert_eq!(v["report"]["n_train"], 7);
}

#[test]
fn test_split_fraction_flag_overrides_invalid_env_value() {
    let v = json_stdout(
        cropyield()
            .env("CROPYIELD_SPLIT_FRACTION", "1.5")
            .args(["--split-fraction", "0.3", "train", "--json"]),
    );
    assert_eq!(v["report"]["n_test"], 3);
}

#[test]
fn test_split_fraction_flag_overrides_invalid_config_file_value() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("cropyield.toml");
    std::fs::write(&config, "split_fraction = 0.0\n").unwrap();

    let v = json_stdout(
        cropyield()
            .arg("--config")
            .arg(&config)
            .args(["--split-fraction", "0.3", "train", "--json"]),
    );
    assert_eq!(v["report"]["n_train"], 7);
}

#[test]
fn test_invalid_env_value_without_override_fails() {
    cropyield()
        .env("CROPYIELD_SPLIT_FRACTION", "1.5")
        .arg("train")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("1.5"));
}

// ============================================================================
// predict
// ============================================================================

#[test]
fn test_predict_defaults_within_observed_yields() {
    let v = json_stdout(cropyield().args(["predict", "--json"]));
    let y = v["predicted_yield"].as_f64().unwrap();
    assert!((8.024..=11.449).contains(&y), "prediction {y}");
    assert_eq!(v["features"]["nitrogen"], 150.0);
    assert!(v["out_of_range"].as_array().unwrap().is_empty());
}

#[test]
fn test_predict_text_output() {
    cropyield()
        .args(["predict", "--nitrogen", "160", "--rainfall", "700", "--temperature", "24.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Predicted Yield"))
        .stdout(predicate::str::contains("dataset average"))
        .stdout(predicate::str::contains("[WARN]").not());
}

#[test]
fn test_predict_out_of_range_warns_but_succeeds() {
    cropyield()
        .args(["predict", "--nitrogen", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[WARN]"))
        .stdout(predicate::str::contains("extrapolation"))
        .stderr(predicate::str::contains("WARN").not());
}

/// Demo table with fractional nitrogen extremes (100.4 and 199.7).
const FRACTIONAL_NITROGEN: &str = "\
Nitrogen_Level,Rainfall,Avg_Temp,Yield
100.4,640,24.5,8.024
112,880,21.0,9.058
125,700,28.0,9.293
138,610,26.5,9.196
150,820,22.5,10.08
161,760,29.5,10.732
174,900,20.5,10.957
186,655,27.0,10.864
193,790,25.0,11.449
199.7,720,23.0,11.222
";

#[test]
fn test_predict_inside_fractional_observed_max_is_not_flagged() {
    let file = temp_csv(FRACTIONAL_NITROGEN);

    let v = json_stdout(
        cropyield_bare()
            .arg("--data")
            .arg(file.path())
            .args(["predict", "--json", "--nitrogen", "199.5"]),
    );
    assert!(v["out_of_range"].as_array().unwrap().is_empty());

    cropyield_bare()
        .arg("--data")
        .arg(file.path())
        .args(["predict", "--nitrogen", "199.8"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Nitrogen Level 199.8 is outside the observed range 100.4 to 199.7",
        ));
}

// ============================================================================
// export
// ============================================================================

#[test]
fn test_export_writes_prediction_column() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("predictions.csv");

    cropyield()
        .arg("export")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 10 rows"));

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Region,Crop_Type,Nitrogen_Level,Phosphorus,Rainfall,Avg_Temp,Yield,Predicted_Yield")
    );
    assert_eq!(lines.count(), 10);
}

#[test]
fn test_export_json_summary() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("predictions.csv");

    let v = json_stdout(cropyield().args(["export", "--json", "--output"]).arg(&out));
    assert_eq!(v["rows"], 10);
    assert_eq!(v["output"], out.to_str().unwrap());
    assert!(out.is_file());
}

// ============================================================================
// Errors and exit codes
// ============================================================================

#[test]
fn test_missing_data_file_exit_code() {
    cropyield_bare()
        .args(["--data", "/nonexistent/yield_data.csv", "explore"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Data file not found"));
}

#[test]
fn test_invalid_split_fraction_exit_code() {
    cropyield()
        .args(["--split-fraction", "1.5", "train"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("split_fraction"));
}

#[test]
fn test_missing_config_file_exit_code() {
    cropyield()
        .args(["--config", "/nonexistent/cropyield.toml", "train"])
        .assert()
        .code(6);
}

#[test]
fn test_missing_column_exit_code() {
    let csv = temp_csv("Nitrogen_Level,Rainfall,Yield\n100,640,8.0\n");
    cropyield_bare()
        .arg("--data")
        .arg(csv.path())
        .arg("explore")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Avg_Temp"));
}

#[test]
fn test_collinear_data_exit_code() {
    let mut csv = String::from("Nitrogen_Level,Rainfall,Avg_Temp,Yield\n");
    for i in 0..10 {
        let n = 100 + 10 * i;
        csv.push_str(&format!("{n},{},{},{}\n", 2 * n, 20 + i % 3, 5 + i));
    }
    let file = temp_csv(&csv);

    cropyield_bare()
        .arg("--data")
        .arg(file.path())
        .arg("train")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Singular fit"));
}
