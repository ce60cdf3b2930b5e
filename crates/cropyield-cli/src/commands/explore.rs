//! `cropyield explore`: dataset overview.

use cropyield::config::TrainingConfig;
use cropyield::data::{DatasetSummary, Feature, InputBounds};
use serde::Serialize;

use super::load_table;
use crate::error::Result;
use crate::output;

#[derive(Serialize)]
struct ExploreOutput<'a> {
    rows: usize,
    columns: usize,
    headers: &'a [String],
    summary: &'a DatasetSummary,
    input_bounds: InputBounds,
}

pub(crate) fn run(config: &TrainingConfig, json: bool) -> Result<()> {
    let table = load_table(config)?;
    let summary = DatasetSummary::from_dataset(table.dataset());
    let input_bounds = summary.input_bounds();

    if json {
        return output::json(&ExploreOutput {
            rows: summary.n_rows,
            columns: table.n_columns(),
            headers: table.headers(),
            summary: &summary,
            input_bounds,
        });
    }

    output::section("Dataset Overview");
    output::kv("File", config.data_path.display());
    output::kv("Shape", format!("{} rows x {} columns", summary.n_rows, table.n_columns()));
    output::kv("Columns", table.headers().join(", "));

    output::section("Key Statistics");
    output::kv("Total Records", summary.n_rows);
    output::kv("Average Yield", output::tons(summary.mean_yield));
    output::kv("Max Yield", output::tons(summary.max_yield));
    output::kv("Min Yield", output::tons(summary.min_yield));

    output::section("Feature Ranges");
    for feature in Feature::ALL {
        let range = summary.range(feature);
        output::kv(
            feature.label(),
            format!("{} to {} {}", range.min, range.max, feature.unit()),
        );
    }

    output::section("Prediction Inputs");
    for feature in Feature::ALL {
        let bounds = input_bounds.get(feature);
        output::kv(
            feature.label(),
            format!(
                "{} to {} {} (step {})",
                bounds.min,
                bounds.max,
                feature.unit(),
                bounds.step
            ),
        );
    }
    Ok(())
}
