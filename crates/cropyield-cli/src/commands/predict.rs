//! `cropyield predict`: point estimate for one set of field conditions.

use cropyield::config::TrainingConfig;
use cropyield::data::{DatasetSummary, Feature, Features};
use cropyield::linear_model::YieldModel;
use cropyield::report::AverageComparison;
use cropyield::Regressor;
use serde::Serialize;
use tracing::debug;

use super::load_table;
use crate::error::Result;
use crate::output;

#[derive(Serialize)]
struct PredictOutput {
    features: Features,
    predicted_yield: f64,
    comparison: AverageComparison,
    out_of_range: Vec<Feature>,
}

pub(crate) fn run(config: &TrainingConfig, query: Features, json: bool) -> Result<()> {
    let table = load_table(config)?;
    let dataset = table.dataset();
    let (model, _) = YieldModel::from_config(config).fit(dataset)?;

    let summary = DatasetSummary::from_dataset(dataset);
    let out_of_range = summary.out_of_range(&query);
    if !out_of_range.is_empty() {
        debug!(?out_of_range, "prediction inputs outside observed data");
    }

    let predicted_yield = model.predict(&query);
    let comparison = AverageComparison::new(predicted_yield, summary.mean_yield);

    if json {
        return output::json(&PredictOutput {
            features: query,
            predicted_yield,
            comparison,
            out_of_range,
        });
    }

    output::section("Yield Prediction");
    for feature in Feature::ALL {
        output::kv(
            feature.label(),
            format!("{} {}", query.get(feature), feature.unit()),
        );
    }
    for feature in &out_of_range {
        let range = summary.range(*feature);
        output::warning(&format!(
            "{} {} is outside the observed range {} to {}; the estimate is an extrapolation",
            feature.label(),
            query.get(*feature),
            range.min,
            range.max
        ));
    }
    output::kv("Predicted Yield", output::tons(predicted_yield));
    output::kv("Compared to average", comparison);
    Ok(())
}
