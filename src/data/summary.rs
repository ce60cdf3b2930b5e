//! Descriptive statistics and interactive input bounds for a dataset.

use serde::{Deserialize, Serialize};

use super::{Dataset, Feature, Features, N_FEATURES};

/// Observed `[min, max]` of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl FeatureRange {
    fn of(values: impl IntoIterator<Item = f64>) -> Self {
        values.into_iter().fold(
            Self {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |acc, v| Self {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        )
    }

    /// Whether `value` lies within the closed range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Headline statistics of a dataset.
///
/// # Examples
///
/// ```
/// use cropyield::data::{Dataset, DatasetSummary, Feature};
///
/// let ds = Dataset::from_rows(&[
///     ([100.0, 640.0, 24.5], 8.0),
///     ([200.0, 900.0, 20.5], 11.0),
/// ]).expect("valid rows");
/// let summary = DatasetSummary::from_dataset(&ds);
/// assert_eq!(summary.n_rows, 2);
/// assert_eq!(summary.max_yield, 11.0);
/// assert_eq!(summary.range(Feature::Rainfall).max, 900.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of samples.
    pub n_rows: usize,
    /// Mean observed yield.
    pub mean_yield: f64,
    /// Smallest observed yield.
    pub min_yield: f64,
    /// Largest observed yield.
    pub max_yield: f64,
    /// Observed range per feature, in model order.
    pub feature_ranges: [FeatureRange; N_FEATURES],
}

impl DatasetSummary {
    /// Computes the summary in one pass per column.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let yields = FeatureRange::of(dataset.iter().map(|s| s.crop_yield()));
        let feature_ranges =
            Feature::ALL.map(|f| FeatureRange::of(dataset.iter().map(|s| s.features().get(f))));

        Self {
            n_rows: dataset.len(),
            mean_yield: dataset.mean_yield(),
            min_yield: yields.min,
            max_yield: yields.max,
            feature_ranges,
        }
    }

    /// Observed range of one feature.
    #[must_use]
    pub fn range(&self, feature: Feature) -> FeatureRange {
        self.feature_ranges[feature.index()]
    }

    /// Features of `query` lying outside the observed range of their column.
    ///
    /// Predictions for such queries are still valid extrapolations; this is
    /// for warning the user only.
    ///
    /// # Examples
    ///
    /// ```
    /// use cropyield::data::{Dataset, DatasetSummary, Feature, Features};
    ///
    /// let ds = Dataset::from_rows(&[
    ///     ([100.4, 640.0, 21.0], 8.0),
    ///     ([199.7, 900.0, 29.0], 11.0),
    /// ]).expect("valid rows");
    /// let summary = DatasetSummary::from_dataset(&ds);
    /// assert!(summary.out_of_range(&Features::new(199.5, 700.0, 25.0)).is_empty());
    /// assert_eq!(summary.out_of_range(&Features::new(199.8, 700.0, 25.0)), vec![Feature::Nitrogen]);
    /// ```
    #[must_use]
    pub fn out_of_range(&self, query: &Features) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|&f| !self.range(f).contains(query.get(f)))
            .collect()
    }

    /// Bounds for interactive prediction inputs.
    ///
    /// Nitrogen and rainfall are whole-number controls whose limits are the
    /// observed extremes truncated toward zero. Temperature keeps its exact
    /// extremes and moves in steps of 0.1.
    #[must_use]
    pub fn input_bounds(&self) -> InputBounds {
        let whole = |range: FeatureRange| SliderBounds {
            min: range.min.trunc(),
            max: range.max.trunc(),
            step: 1.0,
        };
        let temp = self.range(Feature::AvgTemp);

        InputBounds {
            nitrogen: whole(self.range(Feature::Nitrogen)),
            rainfall: whole(self.range(Feature::Rainfall)),
            avg_temp: SliderBounds {
                min: temp.min,
                max: temp.max,
                step: 0.1,
            },
        }
    }
}

/// Limits and granularity of one interactive control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderBounds {
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value.
    pub max: f64,
    /// Increment between selectable values.
    pub step: f64,
}

impl SliderBounds {
    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Bounds of the three prediction controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    /// Nitrogen control.
    pub nitrogen: SliderBounds,
    /// Rainfall control.
    pub rainfall: SliderBounds,
    /// Temperature control.
    pub avg_temp: SliderBounds,
}

impl InputBounds {
    /// Bounds of one control.
    #[must_use]
    pub fn get(&self, feature: Feature) -> SliderBounds {
        match feature {
            Feature::Nitrogen => self.nitrogen,
            Feature::Rainfall => self.rainfall,
            Feature::AvgTemp => self.avg_temp,
        }
    }

    /// Features of `query` that their control cannot select.
    ///
    /// Whole-number controls are truncated, so a value just below a
    /// fractional observed maximum can be in the data yet not selectable.
    /// Use [`DatasetSummary::out_of_range`] to detect extrapolation.
    #[must_use]
    pub fn out_of_range(&self, query: &Features) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|&f| !self.get(f).contains(query.get(f)))
            .collect()
    }

    /// Whether every feature of `query` is selectable.
    #[must_use]
    pub fn contains(&self, query: &Features) -> bool {
        self.out_of_range(query).is_empty()
    }
}
