//! `cropyield train`: fit, evaluate and show the coefficients.

use cropyield::config::TrainingConfig;
use cropyield::linear_model::{EvaluationReport, YieldModel};
use cropyield::report::{compare_predictions, CoefficientRow, PredictionComparison};
use cropyield::Regressor;
use serde::Serialize;

use super::load_table;
use crate::error::Result;
use crate::output;

#[derive(Serialize)]
struct TrainOutput {
    report: EvaluationReport,
    intercept: f64,
    coefficients: Vec<CoefficientRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_predictions: Option<Vec<PredictionComparison>>,
}

pub(crate) fn run(config: &TrainingConfig, show_test: bool, json: bool) -> Result<()> {
    let table = load_table(config)?;
    let run = YieldModel::from_config(config).train(table.dataset())?;

    let test_predictions = if show_test {
        Some(compare_predictions(
            &run.test.yields(),
            &run.model.predict_dataset(&run.test),
        )?)
    } else {
        None
    };

    if json {
        return output::json(&TrainOutput {
            report: run.report,
            intercept: run.model.intercept(),
            coefficients: run.model.coefficient_table(),
            test_predictions,
        });
    }

    output::section("Model Performance");
    output::kv("R² Score (test)", format!("{:.4}", run.report.r2_test));
    output::kv("RMSE (test)", format!("{:.4} tons/ha", run.report.rmse_test));
    output::kv("Training Samples", run.report.n_train);
    output::kv("Test Samples", run.report.n_test);
    output::kv("R² Score (train)", format!("{:.4}", run.report.r2_train));

    output::section("Feature Coefficients");
    output::kv("Intercept", format!("{:.4}", run.model.intercept()));
    for row in run.model.coefficient_table() {
        output::kv(
            row.feature.label(),
            format!("{:+.6}  ({})", row.coefficient, row.interpretation),
        );
    }

    if let Some(rows) = test_predictions {
        output::section("Actual vs Predicted (test set)");
        println!(
            "  {:>10}  {:>10}  {:>10}  {:>8}",
            "Actual", "Predicted", "Error", "Error %"
        );
        for row in rows {
            let pct = row
                .error_percent
                .map_or_else(|| "n/a".to_string(), |p| format!("{p:.2}"));
            println!(
                "  {:>10.3}  {:>10.3}  {:>+10.3}  {:>8}",
                row.actual, row.predicted, row.error, pct
            );
        }
    }
    Ok(())
}
