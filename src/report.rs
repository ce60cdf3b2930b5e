//! Presentation helpers: coefficient tables, actual-vs-predicted comparisons
//! and how a single prediction relates to the dataset average.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Feature;
use crate::error::{Result, YieldError};

/// One row of a coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoefficientRow {
    /// The feature the coefficient multiplies.
    pub feature: Feature,
    /// Change in predicted yield per unit of the feature.
    pub coefficient: f64,
    /// Reading guide, e.g. "Impact per mm Rainfall".
    pub interpretation: &'static str,
}

/// Observed and predicted yield of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionComparison {
    /// Observed yield.
    pub actual: f64,
    /// Model output.
    pub predicted: f64,
    /// `actual - predicted`.
    pub error: f64,
    /// `|error / actual| · 100`, or `None` when `actual` is zero.
    pub error_percent: Option<f64>,
}

impl PredictionComparison {
    /// Compares one observation with its prediction.
    #[must_use]
    pub fn new(actual: f64, predicted: f64) -> Self {
        let error = actual - predicted;
        let error_percent = (actual != 0.0).then(|| (error / actual).abs() * 100.0);
        Self {
            actual,
            predicted,
            error,
            error_percent,
        }
    }
}

/// Pairs observed yields with predictions, row by row.
///
/// # Examples
///
/// ```
/// use cropyield::report::compare_predictions;
///
/// let rows = compare_predictions(&[10.0, 0.0], &[9.5, 0.2]).expect("same length");
/// assert_eq!(rows[0].error, 0.5);
/// assert_eq!(rows[0].error_percent, Some(5.0));
/// assert_eq!(rows[1].error_percent, None);
/// ```
///
/// # Errors
///
/// Returns [`YieldError::InvalidDataset`] if the slices differ in length.
pub fn compare_predictions(actual: &[f64], predicted: &[f64]) -> Result<Vec<PredictionComparison>> {
    if actual.len() != predicted.len() {
        return Err(YieldError::invalid_dataset(format!(
            "{} actual values for {} predictions",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| PredictionComparison::new(a, p))
        .collect())
}

/// Where a prediction sits relative to the dataset mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Prediction exceeds the mean.
    Above,
    /// Prediction is below the mean.
    Below,
    /// Prediction equals the mean.
    Equal,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::Equal => "equal to",
        })
    }
}

/// A prediction compared with the average observed yield.
///
/// # Examples
///
/// ```
/// use cropyield::report::{AverageComparison, Direction};
///
/// let cmp = AverageComparison::new(10.5, 10.0);
/// assert_eq!(cmp.direction, Direction::Above);
/// assert!((cmp.difference - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageComparison {
    /// The prediction.
    pub prediction: f64,
    /// Mean observed yield of the dataset.
    pub dataset_mean: f64,
    /// Sign of `prediction - dataset_mean`.
    pub direction: Direction,
    /// Absolute difference, tons/ha.
    pub difference: f64,
}

impl AverageComparison {
    /// Compares `prediction` with `dataset_mean`.
    #[must_use]
    pub fn new(prediction: f64, dataset_mean: f64) -> Self {
        let direction = match prediction.partial_cmp(&dataset_mean) {
            Some(Ordering::Greater) => Direction::Above,
            Some(Ordering::Less) => Direction::Below,
            _ => Direction::Equal,
        };
        Self {
            prediction,
            dataset_mean,
            direction,
            difference: (prediction - dataset_mean).abs(),
        }
    }
}

impl fmt::Display for AverageComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Equal => write!(f, "equal to the dataset average"),
            direction => write!(
                f,
                "{:.2} tons/ha {direction} the dataset average",
                self.difference
            ),
        }
    }
}
