//! Error types for the cropyield CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use cropyield::YieldError;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Data file not found
    #[error("Data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    /// Unreadable or invalid input data
    #[error("{0}")]
    InvalidData(String),

    /// Model could not be fitted or scored
    #[error("{0}")]
    Model(String),

    /// Bad configuration file, environment or flags
    #[error("{0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Numeric exit status for this error
    pub(crate) fn code(&self) -> u8 {
        match self {
            Self::Json(_) => 1,
            Self::DataNotFound(_) => 3,
            Self::InvalidData(_) => 4,
            Self::Model(_) => 5,
            Self::Config(_) => 6,
            Self::Io(_) => 7,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<YieldError> for CliError {
    fn from(e: YieldError) -> Self {
        match e {
            YieldError::DataNotFound(path) => Self::DataNotFound(path),
            YieldError::Io(io) => Self::Io(io),
            YieldError::Config(msg) => Self::Config(format!("Configuration error: {msg}")),
            e @ (YieldError::SingularFit { .. } | YieldError::DegenerateVariance { .. }) => {
                Self::Model(e.to_string())
            }
            e @ (YieldError::InvalidDataset { .. }
            | YieldError::MissingColumn(_)
            | YieldError::Parse { .. }
            | YieldError::Csv(_)) => Self::InvalidData(e.to_string()),
        }
    }
}
