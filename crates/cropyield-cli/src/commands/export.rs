//! `cropyield export`: write the table with a prediction per row.

use std::path::Path;

use cropyield::config::TrainingConfig;
use cropyield::data::csv::export_with_predictions;
use cropyield::linear_model::YieldModel;
use cropyield::Regressor;
use serde::Serialize;

use super::load_table;
use crate::error::Result;
use crate::output;

#[derive(Serialize)]
struct ExportOutput<'a> {
    rows: usize,
    output: &'a Path,
}

pub(crate) fn run(config: &TrainingConfig, path: &Path, json: bool) -> Result<()> {
    let table = load_table(config)?;
    let (model, _) = YieldModel::from_config(config).fit(table.dataset())?;
    let predictions = model.predict_dataset(table.dataset());

    export_with_predictions(&table, &predictions, path)?;
    if json {
        return output::json(&ExportOutput {
            rows: predictions.len(),
            output: path,
        });
    }
    output::success(&format!(
        "Wrote {} rows with predictions to {}",
        predictions.len(),
        path.display()
    ));
    Ok(())
}
