//! Layered training configuration.
//!
//! Values are merged in order, later sources winning:
//!
//! 1. built-in defaults (`data_path = "yield_data.csv"`, `split_fraction = 0.2`, `seed = 42`)
//! 2. an optional TOML file
//! 3. `CROPYIELD_`-prefixed environment variables, e.g. `CROPYIELD_SEED=7`

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Result, YieldError};

const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "CROPYIELD_";

/// Settings for one training run.
///
/// # Examples
///
/// ```
/// use cropyield::config::TrainingConfig;
///
/// let config = TrainingConfig::default().with_seed(7).with_split_fraction(0.25);
/// assert_eq!(config.seed, 7);
/// assert!(config.validate().is_ok());
/// assert!(config.with_split_fraction(1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// CSV file with the agricultural samples.
    pub data_path: PathBuf,
    /// Share of rows held out for evaluation.
    pub split_fraction: f64,
    /// Split seed.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("yield_data.csv"),
            split_fraction: crate::linear_model::DEFAULT_SPLIT_FRACTION,
            seed: crate::linear_model::DEFAULT_SEED,
        }
    }
}

impl TrainingConfig {
    /// Loads defaults, then `file` if given, then the environment.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::Config`] if `file` does not exist, a value has
    /// the wrong type, or the merged result fails [`TrainingConfig::validate`].
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let config = Self::load_unvalidated(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`TrainingConfig::load`] but without range checks, so callers
    /// can apply their own overrides before calling
    /// [`TrainingConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::Config`] if `file` does not exist or a value has
    /// the wrong type.
    pub fn load_unvalidated(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            if !path.is_file() {
                return Err(YieldError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }
        Self::extract(Self::figment(file))
    }

    /// The provider stack used by [`TrainingConfig::load`].
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Toml::string(DEFAULT_CONFIG));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    fn extract(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    /// Sets the data file.
    #[must_use]
    pub fn with_data_path(mut self, data_path: impl Into<PathBuf>) -> Self {
        self.data_path = data_path.into();
        self
    }

    /// Sets the evaluation share.
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

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::Config`] if `split_fraction` is not strictly
    /// between 0 and 1 or `data_path` is empty.
    pub fn validate(&self) -> Result<()> {
        if !(self.split_fraction > 0.0 && self.split_fraction < 1.0) {
            return Err(YieldError::Config(format!(
                "split_fraction must be strictly between 0 and 1, got {}",
                self.split_fraction
            )));
        }
        if self.data_path.as_os_str().is_empty() {
            return Err(YieldError::Config("data_path must not be empty".to_string()));
        }
        Ok(())
    }
}
