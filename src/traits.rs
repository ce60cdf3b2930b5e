//! Core trait for yield predictors.

use crate::data::{Dataset, Features};
use crate::error::Result;
use crate::metrics::r_squared;

/// Anything that maps a feature vector to a yield estimate.
///
/// Implementors only provide [`Regressor::predict`]; batch prediction and
/// scoring come for free.
///
/// # Examples
///
/// ```
/// use cropyield::prelude::*;
///
/// let model = FittedModel::new(2.0, [3.0, -1.0, 0.5]);
/// let y = model.predict(&Features::new(1.0, 1.0, 2.0));
/// assert!((y - 5.0).abs() < 1e-12);
/// ```
pub trait Regressor {
    /// Predicts the yield for one feature vector.
    fn predict(&self, features: &Features) -> f64;

    /// Predicts every row of `dataset`, in order.
    fn predict_dataset(&self, dataset: &Dataset) -> Vec<f64> {
        dataset.iter().map(|s| self.predict(&s.features())).collect()
    }

    /// R² of the predictions on `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::YieldError::DegenerateVariance`] if every
    /// observed yield in `dataset` is identical.
    fn score(&self, dataset: &Dataset) -> Result<f64> {
        r_squared(&self.predict_dataset(dataset), &dataset.yields())
    }
}
