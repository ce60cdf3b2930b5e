//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use cropyield::prelude::*;
//! ```

pub use crate::config::TrainingConfig;
pub use crate::data::csv::{load_csv, YieldTable};
pub use crate::data::{Dataset, DatasetSummary, Feature, Features, Sample};
pub use crate::error::{Result, YieldError};
pub use crate::linear_model::{EvaluationReport, FittedModel, TrainingRun, YieldModel};
pub use crate::metrics::{mae, mse, r_squared, rmse};
pub use crate::model_selection::{train_test_split, Split};
pub use crate::traits::Regressor;
