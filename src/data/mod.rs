//! Agricultural samples and datasets.
//!
//! A [`Dataset`] is an ordered, immutable sequence of [`Sample`]s, each pairing
//! the three agronomic [`Features`] with an observed crop yield. Datasets are
//! validated once at construction: every feature and target must be present
//! and finite, and at least one sample is required.

pub mod csv;
mod summary;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, YieldError};
use crate::primitives::Matrix;

pub use summary::{DatasetSummary, FeatureRange, InputBounds, SliderBounds};

/// Number of model inputs.
pub const N_FEATURES: usize = 3;

/// CSV column holding the target.
pub const TARGET_COLUMN: &str = "Yield";

/// One of the three numeric model inputs, in model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    /// Nitrogen applied, kg/ha.
    Nitrogen,
    /// Seasonal rainfall, mm.
    Rainfall,
    /// Average temperature, °C.
    AvgTemp,
}

impl Feature {
    /// All features in the order used for fitting and prediction.
    pub const ALL: [Feature; N_FEATURES] = [Self::Nitrogen, Self::Rainfall, Self::AvgTemp];

    /// Position in a feature vector.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Nitrogen => 0,
            Self::Rainfall => 1,
            Self::AvgTemp => 2,
        }
    }

    /// Source column name.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Nitrogen => "Nitrogen_Level",
            Self::Rainfall => "Rainfall",
            Self::AvgTemp => "Avg_Temp",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Nitrogen => "Nitrogen Level",
            Self::Rainfall => "Rainfall",
            Self::AvgTemp => "Avg Temperature",
        }
    }

    /// Measurement unit.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Nitrogen => "kg/ha",
            Self::Rainfall => "mm",
            Self::AvgTemp => "°C",
        }
    }

    /// How to read this feature's coefficient.
    #[must_use]
    pub fn interpretation(self) -> &'static str {
        match self {
            Self::Nitrogen => "Impact per kg/ha Nitrogen",
            Self::Rainfall => "Impact per mm Rainfall",
            Self::AvgTemp => "Impact per °C Temperature",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A feature vector `(nitrogen, rainfall, avg_temp)`.
///
/// # Examples
///
/// ```
/// use cropyield::data::{Feature, Features};
///
/// let f = Features::new(150.0, 750.0, 26.0);
/// assert_eq!(f.get(Feature::Rainfall), 750.0);
/// assert_eq!(f.to_array(), [150.0, 750.0, 26.0]);
///
/// let from_slice = Features::try_from(&[150.0, 750.0, 26.0][..]).expect("three values");
/// assert_eq!(from_slice, f);
/// assert!(Features::try_from(&[1.0, 2.0][..]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Nitrogen level, kg/ha.
    pub nitrogen: f64,
    /// Rainfall, mm.
    pub rainfall: f64,
    /// Average temperature, °C.
    pub avg_temp: f64,
}

impl Features {
    /// Creates a feature vector.
    #[must_use]
    pub fn new(nitrogen: f64, rainfall: f64, avg_temp: f64) -> Self {
        Self {
            nitrogen,
            rainfall,
            avg_temp,
        }
    }

    /// Value of one feature.
    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Nitrogen => self.nitrogen,
            Feature::Rainfall => self.rainfall,
            Feature::AvgTemp => self.avg_temp,
        }
    }

    /// Values in model order.
    #[must_use]
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [self.nitrogen, self.rainfall, self.avg_temp]
    }

    /// First feature that is NaN or infinite, if any.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<Feature> {
        Feature::ALL.into_iter().find(|&f| !self.get(f).is_finite())
    }
}

impl From<[f64; N_FEATURES]> for Features {
    fn from([nitrogen, rainfall, avg_temp]: [f64; N_FEATURES]) -> Self {
        Self::new(nitrogen, rainfall, avg_temp)
    }
}

impl TryFrom<&[f64]> for Features {
    type Error = YieldError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [nitrogen, rainfall, avg_temp] => Ok(Self::new(nitrogen, rainfall, avg_temp)),
            _ => Err(YieldError::invalid_dataset(format!(
                "expected {N_FEATURES} features (nitrogen, rainfall, avg_temp), got {}",
                values.len()
            ))),
        }
    }
}

/// A labeled observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    features: Features,
    crop_yield: f64,
}

impl Sample {
    /// Pairs a feature vector with its observed yield (tons/ha).
    #[must_use]
    pub fn new(features: Features, crop_yield: f64) -> Self {
        Self {
            features,
            crop_yield,
        }
    }

    /// The inputs.
    #[must_use]
    pub fn features(&self) -> Features {
        self.features
    }

    /// The observed yield.
    #[must_use]
    pub fn crop_yield(&self) -> f64 {
        self.crop_yield
    }
}

/// An ordered, validated, non-empty sequence of samples.
///
/// # Examples
///
/// ```
/// use cropyield::data::{Dataset, Features, Sample};
///
/// let ds = Dataset::new(vec![
///     Sample::new(Features::new(120.0, 700.0, 24.0), 8.5),
///     Sample::new(Features::new(180.0, 820.0, 27.5), 10.9),
/// ]).expect("two valid rows");
/// assert_eq!(ds.len(), 2);
/// assert!((ds.mean_yield() - 9.7).abs() < 1e-12);
///
/// assert!(Dataset::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    samples: Vec<Sample>,
}

/// Unchecked wire form of [`Dataset`]; deserialization goes through
/// [`Dataset::new`].
#[derive(Deserialize)]
struct RawDataset {
    samples: Vec<Sample>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = YieldError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Self::new(raw.samples)
    }
}

impl Dataset {
    /// Validates and wraps the samples.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::InvalidDataset`] if `samples` is empty or any
    /// feature or yield is missing (NaN) or infinite.
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(YieldError::invalid_dataset("dataset has no samples"));
        }

        for (row, sample) in samples.iter().enumerate() {
            if let Some(feature) = sample.features.first_non_finite() {
                return Err(YieldError::invalid_dataset(format!(
                    "row {row}: {} is missing or not finite",
                    feature.column()
                )));
            }
            if !sample.crop_yield.is_finite() {
                return Err(YieldError::invalid_dataset(format!(
                    "row {row}: {TARGET_COLUMN} is missing or not finite"
                )));
            }
        }

        Ok(Self { samples })
    }

    /// Builds a dataset from `([nitrogen, rainfall, avg_temp], yield)` rows.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::new`].
    pub fn from_rows(rows: &[([f64; N_FEATURES], f64)]) -> Result<Self> {
        Self::new(
            rows.iter()
                .map(|&(x, y)| Sample::new(Features::from(x), y))
                .collect(),
        )
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples in order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterates over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Observed yields in row order.
    #[must_use]
    pub fn yields(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::crop_yield).collect()
    }

    /// Feature matrix of shape `(len, 3)`.
    #[must_use]
    pub fn feature_matrix(&self) -> Matrix {
        let rows: Vec<[f64; N_FEATURES]> =
            self.samples.iter().map(|s| s.features.to_array()).collect();
        Matrix::from_rows(&rows)
    }

    /// Mean of the observed yields.
    #[must_use]
    pub fn mean_yield(&self) -> f64 {
        self.samples.iter().map(Sample::crop_yield).sum::<f64>() / self.samples.len() as f64
    }

    /// New dataset made of the rows at `indices`, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::InvalidDataset`] if `indices` is empty or any
    /// index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let samples = indices
            .iter()
            .map(|&i| {
                self.samples.get(i).copied().ok_or_else(|| {
                    YieldError::invalid_dataset(format!(
                        "row index {i} out of bounds (len={})",
                        self.samples.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(samples)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
