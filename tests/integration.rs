//! Integration tests for the cropyield library.
//!
//! These tests exercise end-to-end workflows: loading, splitting, fitting,
//! scoring, predicting and exporting.

use cropyield::data::csv::{export_with_predictions, load_csv, PREDICTION_COLUMN};
use cropyield::prelude::*;
use cropyield::report::{compare_predictions, AverageComparison, Direction};
use std::path::PathBuf;

fn demo_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/yield_data.csv")
}

/// Ten field trials: yield ≈ 0.5 + 0.03·N + 0.004·R + 0.08·T plus small noise.
fn field_trials() -> Dataset {
    Dataset::from_rows(&[
        ([100.0, 640.0, 24.5], 8.024),
        ([112.0, 880.0, 21.0], 9.058),
        ([125.0, 700.0, 28.0], 9.293),
        ([138.0, 610.0, 26.5], 9.196),
        ([150.0, 820.0, 22.5], 10.08),
        ([161.0, 760.0, 29.5], 10.732),
        ([174.0, 900.0, 20.5], 10.957),
        ([186.0, 655.0, 27.0], 10.864),
        ([193.0, 790.0, 25.0], 11.449),
        ([200.0, 720.0, 23.0], 11.222),
    ])
    .expect("valid rows")
}

/// Deterministic uniform draws in `[0, 1)`.
struct XorShift(u64);

impl XorShift {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[test]
fn test_field_trial_scenario() {
    let dataset = field_trials();
    let (model, split) = cropyield::fit(&dataset, 0.2, 42).expect("full rank");
    assert_eq!(split.n_train(), 8);
    assert_eq!(split.n_test(), 2);

    let (train, test) = split.subsets(&dataset).expect("same dataset");
    let report = cropyield::evaluate(&model, &train, &test).expect("subsets vary");
    assert!(report.r2_test > 0.8, "r2_test = {}", report.r2_test);

    let y = cropyield::predict(&model, &Features::new(150.0, 750.0, 26.0));
    let summary = DatasetSummary::from_dataset(&dataset);
    assert!(
        (summary.min_yield..=summary.max_yield).contains(&y),
        "prediction {y} outside [{}, {}]",
        summary.min_yield,
        summary.max_yield
    );
}

#[test]
fn test_demo_file_matches_in_memory_trials() {
    let table = load_csv(demo_csv()).expect("demo data present");
    assert_eq!(table.dataset(), &field_trials());
    assert_eq!(table.n_columns(), 7);
}

#[test]
fn test_perfect_fit_workflow() {
    let rows: Vec<([f64; 3], f64)> = (0..50)
        .map(|i| {
            let i = f64::from(i);
            let x = [
                100.0 + 2.0 * i,
                600.0 + (i * 53.0) % 300.0,
                20.0 + (i * 0.7) % 10.0,
            ];
            (x, 2.0 + 3.0 * x[0] - x[1] + 0.5 * x[2])
        })
        .collect();
    let dataset = Dataset::from_rows(&rows).expect("valid rows");

    let run = YieldModel::new().train(&dataset).expect("full rank");
    assert!((run.model.intercept() - 2.0).abs() < 1e-6);
    for (got, want) in run.model.coefficients().iter().zip([3.0, -1.0, 0.5]) {
        assert!((got - want).abs() < 1e-6, "{got} != {want}");
    }
    assert!((run.report.r2_train - 1.0).abs() < 1e-9);
    assert!((run.report.r2_test - 1.0).abs() < 1e-9);
}

#[test]
fn test_pure_noise_target_is_not_forced_into_unit_range() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let rows: Vec<([f64; 3], f64)> = (0..200)
        .map(|_| {
            let x = [
                100.0 + 100.0 * rng.next_f64(),
                600.0 + 300.0 * rng.next_f64(),
                20.0 + 10.0 * rng.next_f64(),
            ];
            (x, 8.0 + 4.0 * rng.next_f64())
        })
        .collect();
    let dataset = Dataset::from_rows(&rows).expect("valid rows");

    let run = YieldModel::new().train(&dataset).expect("full rank");
    assert!(run.report.r2_test < 0.3, "r2_test = {}", run.report.r2_test);
    assert!(run.report.r2_test.is_finite());
}

#[test]
fn test_predict_then_export_workflow() {
    let table = load_csv(demo_csv()).expect("demo data present");
    let (model, _) = YieldModel::new().fit(table.dataset()).expect("full rank");
    let predictions = model.predict_dataset(table.dataset());
    assert_eq!(predictions.len(), 10);

    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("predictions.csv");
    export_with_predictions(&table, &predictions, &out).expect("export");

    let reloaded = load_csv(&out).expect("reload");
    let column = reloaded.column(PREDICTION_COLUMN).expect("prediction column");
    let parsed: Vec<f64> = column.iter().map(|v| v.parse().expect("number")).collect();
    assert_eq!(parsed, predictions);
    assert_eq!(reloaded.column("Region"), table.column("Region"));
}

#[test]
fn test_test_set_comparison_workflow() {
    let run = YieldModel::new().train(&field_trials()).expect("full rank");
    let rows = compare_predictions(&run.test.yields(), &run.model.predict_dataset(&run.test))
        .expect("same length");
    assert_eq!(rows.len(), run.report.n_test);
    for row in rows {
        assert!((row.actual - row.predicted - row.error).abs() < 1e-12);
        assert!(row.error_percent.expect("non-zero yield") < 10.0);
    }
}

#[test]
fn test_interactive_prediction_workflow() {
    let dataset = field_trials();
    let summary = DatasetSummary::from_dataset(&dataset);
    let bounds = summary.input_bounds();
    let (model, _) = YieldModel::new().fit(&dataset).expect("full rank");

    let high = Features::new(200.0, 900.0, 29.5);
    assert!(bounds.contains(&high));
    let cmp = AverageComparison::new(model.predict(&high), summary.mean_yield);
    assert_eq!(cmp.direction, Direction::Above);

    let low = Features::new(100.0, 610.0, 20.5);
    let cmp = AverageComparison::new(model.predict(&low), summary.mean_yield);
    assert_eq!(cmp.direction, Direction::Below);
}

#[test]
fn test_config_drives_model_settings() {
    let config = TrainingConfig::default().with_split_fraction(0.3).with_seed(9);
    let model = YieldModel::from_config(&config);
    let (_, split) = model.fit(&field_trials()).expect("full rank");
    assert_eq!(split.n_test(), 3);
    assert_eq!(model.seed(), 9);
}

#[test]
fn test_non_finite_feature_rejected() {
    let err = Dataset::from_rows(&[([100.0, f64::NAN, 24.0], 8.0)]).unwrap_err();
    assert!(matches!(err, YieldError::InvalidDataset { .. }));
    assert!(err.to_string().contains("Rainfall"));
}
