//! Subcommand implementations.

pub(crate) mod explore;
pub(crate) mod export;
pub(crate) mod predict;
pub(crate) mod train;

use std::path::{Path, PathBuf};

use cropyield::config::TrainingConfig;
use cropyield::data::csv::{load_csv, YieldTable};
use tracing::debug;

use crate::error::Result;

/// Flag values that override the loaded configuration.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) data: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) split_fraction: Option<f64>,
}

/// Resolves the configuration: file and environment first, then flags.
/// Ranges are checked once, after the flags are applied.
pub(crate) fn resolve_config(file: Option<&Path>, overrides: Overrides) -> Result<TrainingConfig> {
    let mut config = TrainingConfig::load_unvalidated(file)?;
    if let Some(data) = overrides.data {
        config = config.with_data_path(data);
    }
    if let Some(seed) = overrides.seed {
        config = config.with_seed(seed);
    }
    if let Some(fraction) = overrides.split_fraction {
        config = config.with_split_fraction(fraction);
    }
    config.validate()?;
    debug!(?config, "resolved configuration");
    Ok(config)
}

/// Loads the table named by `config`.
pub(crate) fn load_table(config: &TrainingConfig) -> Result<YieldTable> {
    Ok(load_csv(&config.data_path)?)
}
