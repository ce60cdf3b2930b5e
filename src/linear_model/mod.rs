//! Crop yield regression.
//!
//! [`YieldModel`] holds the fitting settings (split fraction and seed). Each
//! call to [`YieldModel::fit`] draws a [`Split`], fits ordinary least
//! squares on the training rows and returns a new, immutable
//! [`FittedModel`]. Models are never refitted in place.
//!
//! ```text
//! yield = intercept + β₁·nitrogen + β₂·rainfall + β₃·avg_temp
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TrainingConfig;
use crate::data::{Dataset, Feature, Features, N_FEATURES};
use crate::error::{Result, YieldError};
use crate::metrics::{r_squared, rmse};
use crate::model_selection::{train_test_split, Split};
use crate::primitives::Matrix;
use crate::report::CoefficientRow;
use crate::traits::Regressor;

/// Default share of rows held out for evaluation.
pub const DEFAULT_SPLIT_FRACTION: f64 = 0.2;

/// Default split seed.
pub const DEFAULT_SEED: u64 = 42;

/// Learned parameters of a linear yield model.
///
/// # Examples
///
/// ```
/// use cropyield::prelude::*;
///
/// let model = FittedModel::new(2.0, [3.0, -1.0, 0.5]);
/// assert_eq!(model.coefficient(Feature::Rainfall), -1.0);
/// assert_eq!(model.predict(&Features::new(0.0, 0.0, 0.0)), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    intercept: f64,
    coefficients: [f64; N_FEATURES],
}

impl FittedModel {
    /// Wraps known parameters.
    #[must_use]
    pub fn new(intercept: f64, coefficients: [f64; N_FEATURES]) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// Fits ordinary least squares on every row of `train`.
    ///
    /// Features and target are mean-centered, the 3×3 normal equations
    /// `(XcᵀXc) β = Xcᵀyc` are solved by Cholesky decomposition and the
    /// intercept is recovered as `ȳ - β·x̄`.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::SingularFit`] if there are fewer than four rows
    /// or the features are collinear or constant.
    pub fn fit_least_squares(train: &Dataset) -> Result<Self> {
        let n_samples = train.len();
        let required = N_FEATURES + 1;
        if n_samples < required {
            return Err(YieldError::singular(format!(
                "insufficient samples: fitting {N_FEATURES} coefficients plus an intercept \
                 needs at least {required} training rows, got {n_samples}"
            )));
        }

        let x = train.feature_matrix();
        let n = n_samples as f64;
        let mut x_mean = [0.0; N_FEATURES];
        for i in 0..n_samples {
            for (mean, value) in x_mean.iter_mut().zip(x.row(i)) {
                *mean += value;
            }
        }
        for mean in &mut x_mean {
            *mean /= n;
        }
        let y_mean = train.mean_yield();

        let mut centered = Vec::with_capacity(n_samples * N_FEATURES);
        for i in 0..n_samples {
            centered.extend(x.row(i).iter().zip(&x_mean).map(|(v, m)| v - m));
        }
        let xc = Matrix::from_vec(n_samples, N_FEATURES, centered)?;
        let y_centered: Vec<f64> = train.iter().map(|s| s.crop_yield() - y_mean).collect();

        let xt = xc.transpose();
        let scatter = xt.matmul(&xc)?;
        let cross = xt.matvec(&y_centered)?;

        let beta = scatter.cholesky_solve(&cross).map_err(|e| match e {
            YieldError::SingularFit { reason } => YieldError::singular(format!(
                "training features are collinear or constant, no unique least-squares \
                 solution ({reason})"
            )),
            other => other,
        })?;

        let mut coefficients = [0.0; N_FEATURES];
        coefficients.copy_from_slice(&beta);
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(b, m)| b * m)
                .sum::<f64>();

        Ok(Self::new(intercept, coefficients))
    }

    /// The intercept term.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficients in model order (nitrogen, rainfall, avg_temp).
    #[must_use]
    pub fn coefficients(&self) -> [f64; N_FEATURES] {
        self.coefficients
    }

    /// Coefficient of one feature.
    #[must_use]
    pub fn coefficient(&self, feature: Feature) -> f64 {
        self.coefficients[feature.index()]
    }

    /// Coefficients labelled with their features, for display.
    #[must_use]
    pub fn coefficient_table(&self) -> Vec<CoefficientRow> {
        Feature::ALL
            .into_iter()
            .map(|feature| CoefficientRow {
                feature,
                coefficient: self.coefficient(feature),
                interpretation: feature.interpretation(),
            })
            .collect()
    }

    /// Scores this model on a training and an evaluation subset.
    ///
    /// # Errors
    ///
    /// See [`evaluate`].
    pub fn evaluate(&self, train: &Dataset, test: &Dataset) -> Result<EvaluationReport> {
        evaluate(self, train, test)
    }
}

impl Regressor for FittedModel {
    /// `intercept + Σ coefficientᵢ · featureᵢ`, without clamping.
    fn predict(&self, features: &Features) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.to_array())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Fit quality on the training and evaluation subsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// R² on the training rows.
    pub r2_train: f64,
    /// R² on the evaluation rows.
    pub r2_test: f64,
    /// RMSE on the evaluation rows, tons/ha.
    pub rmse_test: f64,
    /// Number of training rows.
    pub n_train: usize,
    /// Number of evaluation rows.
    pub n_test: usize,
}

/// Evaluates `model` on both subsets.
///
/// R² uses each subset's own mean. RMSE is reported for `test`.
///
/// # Errors
///
/// Returns [`YieldError::DegenerateVariance`] naming the subset whose
/// observed yields are all identical.
pub fn evaluate<M: Regressor>(model: &M, train: &Dataset, test: &Dataset) -> Result<EvaluationReport> {
    let train_pred = model.predict_dataset(train);
    let test_pred = model.predict_dataset(test);
    let train_true = train.yields();
    let test_true = test.yields();

    let r2_train = r_squared(&train_pred, &train_true).map_err(|e| in_subset(e, "train"))?;
    let r2_test = r_squared(&test_pred, &test_true).map_err(|e| in_subset(e, "test"))?;
    let rmse_test = rmse(&test_pred, &test_true)?;

    debug!(r2_train, r2_test, rmse_test, "evaluated yield model");

    Ok(EvaluationReport {
        r2_train,
        r2_test,
        rmse_test,
        n_train: train.len(),
        n_test: test.len(),
    })
}

fn in_subset(err: YieldError, subset: &str) -> YieldError {
    match err {
        YieldError::DegenerateVariance { .. } => YieldError::degenerate_variance(subset),
        other => other,
    }
}

/// Predicts one yield. Inputs outside the training range extrapolate.
#[must_use]
pub fn predict(model: &FittedModel, features: &Features) -> f64 {
    model.predict(features)
}

/// Splits `dataset` and fits least squares on the training part.
///
/// # Errors
///
/// See [`YieldModel::fit`].
pub fn fit(dataset: &Dataset, split_fraction: f64, seed: u64) -> Result<(FittedModel, Split)> {
    YieldModel::new()
        .with_split_fraction(split_fraction)
        .with_seed(seed)
        .fit(dataset)
}

/// Everything produced by one training pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRun {
    /// The fitted parameters.
    pub model: FittedModel,
    /// The partition used.
    pub split: Split,
    /// Training rows.
    pub train: Dataset,
    /// Evaluation rows.
    pub test: Dataset,
    /// Scores on both subsets.
    pub report: EvaluationReport,
}

/// Fitting settings for the yield model.
///
/// # Examples
///
/// ```
/// use cropyield::prelude::*;
///
/// let rows: Vec<([f64; 3], f64)> = (0..20)
///     .map(|i| {
///         let i = f64::from(i);
///         let x = [100.0 + 5.0 * i, 600.0 + (i * 37.0) % 300.0, 20.0 + (i * 3.0) % 10.0];
///         (x, 2.0 + 3.0 * x[0] - x[1] + 0.5 * x[2])
///     })
///     .collect();
/// let dataset = Dataset::from_rows(&rows).expect("valid rows");
///
/// let (model, split) = YieldModel::new().with_seed(7).fit(&dataset).expect("full rank");
/// assert_eq!(split.n_test(), 4);
/// assert!((model.coefficient(Feature::Nitrogen) - 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldModel {
    split_fraction: f64,
    seed: u64,
}

impl Default for YieldModel {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldModel {
    /// Creates a model with a 20 % evaluation share and seed 42.
    #[must_use]
    pub fn new() -> Self {
        Self {
            split_fraction: DEFAULT_SPLIT_FRACTION,
            seed: DEFAULT_SEED,
        }
    }

    /// Takes split fraction and seed from a configuration.
    #[must_use]
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self {
            split_fraction: config.split_fraction,
            seed: config.seed,
        }
    }

    /// Sets the share of rows held out for evaluation, in `(0, 1)`.
    #[must_use]
    pub fn with_split_fraction(mut self, split_fraction: f64) -> Self {
        self.split_fraction = split_fraction;
        self
    }

    /// Sets the split seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The evaluation share.
    #[must_use]
    pub fn split_fraction(&self) -> f64 {
        self.split_fraction
    }

    /// The split seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a split and fits least squares on its training rows.
    ///
    /// Pure: the same dataset and settings always give the same split and
    /// coefficients.
    ///
    /// # Errors
    ///
    /// - [`YieldError::InvalidDataset`] if the split fraction is outside
    ///   `(0, 1)` or leaves a subset empty
    /// - [`YieldError::SingularFit`] if the training rows do not determine a
    ///   unique plane
    pub fn fit(&self, dataset: &Dataset) -> Result<(FittedModel, Split)> {
        let split = train_test_split(dataset.len(), self.split_fraction, self.seed)?;
        let train = dataset.select(split.train_indices())?;
        let model = FittedModel::fit_least_squares(&train)?;

        debug!(
            n_train = split.n_train(),
            n_test = split.n_test(),
            seed = self.seed,
            intercept = model.intercept,
            coefficients = ?model.coefficients,
            "fitted yield model"
        );

        Ok((model, split))
    }

    /// Fits, then evaluates on both subsets of the split.
    ///
    /// # Errors
    ///
    /// Any error of [`YieldModel::fit`] or [`evaluate`].
    pub fn train(&self, dataset: &Dataset) -> Result<TrainingRun> {
        let (model, split) = self.fit(dataset)?;
        let (train, test) = split.subsets(dataset)?;
        let report = evaluate(&model, &train, &test)?;
        Ok(TrainingRun {
            model,
            split,
            train,
            test,
            report,
        })
    }
}

#[cfg(test)]
#[path = "linear_model_tests.rs"]
mod tests;
