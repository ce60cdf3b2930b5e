//! Error types for cropyield operations.
//!
//! Every failure is a local computation or loading failure; nothing here is
//! retried or partially recovered.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cropyield operations.
///
/// # Examples
///
/// ```
/// use cropyield::error::YieldError;
///
/// let err = YieldError::invalid_dataset("dataset is empty");
/// assert!(err.to_string().contains("Invalid dataset"));
/// ```
#[derive(Error, Debug)]
pub enum YieldError {
    /// Empty dataset, missing feature, bad split fraction or wrong feature count.
    #[error("Invalid dataset: {reason}")]
    InvalidDataset {
        /// What was wrong with the input
        reason: String,
    },

    /// Least squares has no unique minimum (collinear or constant features).
    #[error("Singular fit: {reason}")]
    SingularFit {
        /// Why the normal equations could not be solved
        reason: String,
    },

    /// R² is undefined because the actual values of a subset are all equal.
    #[error("Degenerate variance: all actual values in the {subset} subset are identical, R² is undefined")]
    DegenerateVariance {
        /// Which subset ("train", "test", ...) had zero variance
        subset: String,
    },

    /// Data file does not exist.
    #[error("Data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    /// A required column is absent from the CSV header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be parsed as a number.
    #[error("Cannot parse {column} = {value:?} on line {line} as a number")]
    Parse {
        /// 1-based line number in the source file (header is line 1)
        line: u64,
        /// Column name
        column: String,
        /// Raw cell content
        value: String,
    },

    /// Malformed delimited input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be extracted or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl YieldError {
    /// Create an invalid dataset error
    #[must_use]
    pub fn invalid_dataset(reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            reason: reason.into(),
        }
    }

    /// Create a singular fit error
    #[must_use]
    pub fn singular(reason: impl Into<String>) -> Self {
        Self::SingularFit {
            reason: reason.into(),
        }
    }

    /// Create a degenerate variance error for the named subset
    #[must_use]
    pub fn degenerate_variance(subset: &str) -> Self {
        Self::DegenerateVariance {
            subset: subset.to_string(),
        }
    }
}

impl From<figment::Error> for YieldError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, YieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dataset_display() {
        let err = YieldError::invalid_dataset("split_fraction must be in (0, 1), got 1.5");
        let msg = err.to_string();
        assert!(msg.contains("Invalid dataset"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_singular_display() {
        let err = YieldError::singular("feature 'Rainfall' is collinear");
        assert!(err.to_string().contains("Singular fit"));
        assert!(err.to_string().contains("Rainfall"));
    }

    #[test]
    fn test_degenerate_variance_display() {
        let err = YieldError::degenerate_variance("test");
        let msg = err.to_string();
        assert!(msg.contains("Degenerate variance"));
        assert!(msg.contains("test subset"));
    }

    #[test]
    fn test_data_not_found_display() {
        let err = YieldError::DataNotFound(PathBuf::from("yield_data.csv"));
        assert_eq!(err.to_string(), "Data file not found: yield_data.csv");
    }

    #[test]
    fn test_parse_display() {
        let err = YieldError::Parse {
            line: 4,
            column: "Rainfall".to_string(),
            value: "n/a".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Rainfall"));
        assert!(msg.contains("\"n/a\""));
        assert!(msg.contains("line 4"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: YieldError = io_err.into();
        assert!(matches!(err, YieldError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = YieldError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_computation_errors() {
        use std::error::Error;
        assert!(YieldError::singular("x").source().is_none());
        assert!(YieldError::degenerate_variance("train").source().is_none());
    }
}
