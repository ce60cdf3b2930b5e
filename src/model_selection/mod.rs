//! Reproducible train/test splitting.
//!
//! A [`Split`] is a strict partition of row indices into a training part and
//! an evaluation part. The permutation is drawn from a `StdRng` seeded with
//! the caller's seed, so the same `(n_samples, split_fraction, seed)` always
//! produces the same partition.
//!
//! # Rounding
//!
//! The evaluation share is rounded up and the training share takes the rest:
//! `n_test = ceil(n * split_fraction)`, `n_train = n - n_test`. A guard of
//! `1e-9` keeps products such as `10 * 0.3` (which is `3.0000000000000004`
//! in binary floating point) from rounding up to an extra row.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::error::{Result, YieldError};

/// Slack subtracted before taking the ceiling of `n * split_fraction`.
const ROUNDING_GUARD: f64 = 1e-9;

/// Row indices of the training and evaluation subsets.
///
/// # Example
///
/// ```rust
/// use cropyield::model_selection::train_test_split;
///
/// let split = train_test_split(10, 0.2, 42).expect("valid fraction");
/// assert_eq!(split.n_train(), 8);
/// assert_eq!(split.n_test(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSplit")]
pub struct Split {
    train: Vec<usize>,
    test: Vec<usize>,
}

#[derive(Deserialize)]
struct RawSplit {
    train: Vec<usize>,
    test: Vec<usize>,
}

impl TryFrom<RawSplit> for Split {
    type Error = YieldError;

    /// Accepts only non-empty sides that together cover `0..n` exactly once.
    fn try_from(raw: RawSplit) -> Result<Self> {
        let n = raw.train.len() + raw.test.len();
        if raw.train.is_empty() || raw.test.is_empty() {
            return Err(YieldError::invalid_dataset(format!(
                "split has an empty subset (n_train={}, n_test={})",
                raw.train.len(),
                raw.test.len()
            )));
        }
        let mut seen = vec![false; n];
        for &i in raw.train.iter().chain(&raw.test) {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(YieldError::invalid_dataset(format!(
                        "split lists row {i} more than once"
                    )))
                }
                None => {
                    return Err(YieldError::invalid_dataset(format!(
                        "split row {i} out of bounds for {n} rows"
                    )))
                }
            }
        }
        Ok(Self {
            train: raw.train,
            test: raw.test,
        })
    }
}

impl Split {
    /// Training row indices, in permutation order.
    #[must_use]
    pub fn train_indices(&self) -> &[usize] {
        &self.train
    }

    /// Evaluation row indices, in permutation order.
    #[must_use]
    pub fn test_indices(&self) -> &[usize] {
        &self.test
    }

    /// Number of training rows.
    #[must_use]
    pub fn n_train(&self) -> usize {
        self.train.len()
    }

    /// Number of evaluation rows.
    #[must_use]
    pub fn n_test(&self) -> usize {
        self.test.len()
    }

    /// Total rows covered by the split.
    #[must_use]
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    /// Always false for a split built by [`train_test_split`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialises `(train, test)` datasets from `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::InvalidDataset`] if `dataset` is not the one the
    /// split was drawn for (row count differs).
    pub fn subsets(&self, dataset: &Dataset) -> Result<(Dataset, Dataset)> {
        if dataset.len() != self.len() {
            return Err(YieldError::invalid_dataset(format!(
                "split covers {} rows but dataset has {}",
                self.len(),
                dataset.len()
            )));
        }
        Ok((dataset.select(&self.train)?, dataset.select(&self.test)?))
    }
}

/// Computes `(n_train, n_test)` for `n_samples` rows.
///
/// # Errors
///
/// Returns [`YieldError::InvalidDataset`] if `split_fraction` is not strictly
/// between 0 and 1, or if either side would be empty.
pub fn split_sizes(n_samples: usize, split_fraction: f64) -> Result<(usize, usize)> {
    if !(split_fraction > 0.0 && split_fraction < 1.0) {
        return Err(YieldError::invalid_dataset(format!(
            "split_fraction must be strictly between 0 and 1, got {split_fraction}"
        )));
    }

    let n_test = ((n_samples as f64 * split_fraction) - ROUNDING_GUARD)
        .ceil()
        .max(0.0) as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        return Err(YieldError::invalid_dataset(format!(
            "split of {n_samples} rows at fraction {split_fraction} leaves an empty subset \
             (n_train={n_train}, n_test={n_test})"
        )));
    }

    Ok((n_train, n_test))
}

/// Shuffles `0..n_samples` with a seeded `StdRng`.
fn shuffle_indices(n_samples: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Partitions `n_samples` row indices into training and evaluation parts.
///
/// The first `n_train` entries of a seeded permutation go to training, the
/// remainder to evaluation (see the module docs for the rounding rule).
///
/// # Errors
///
/// See [`split_sizes`].
pub fn train_test_split(n_samples: usize, split_fraction: f64, seed: u64) -> Result<Split> {
    let (n_train, _) = split_sizes(n_samples, split_fraction)?;
    let mut train = shuffle_indices(n_samples, seed);
    let test = train.split_off(n_train);
    Ok(Split { train, test })
}
