//! Regression metrics.
//!
//! All functions take `(y_pred, y_true)` slices of equal, non-zero length.

use crate::error::{Result, YieldError};

fn check_lengths(y_pred: &[f64], y_true: &[f64]) -> Result<()> {
    if y_pred.len() != y_true.len() {
        return Err(YieldError::invalid_dataset(format!(
            "{} predictions for {} actual values",
            y_pred.len(),
            y_true.len()
        )));
    }
    if y_true.is_empty() {
        return Err(YieldError::invalid_dataset("cannot score an empty subset"));
    }
    Ok(())
}

fn sum_squared_residuals(y_pred: &[f64], y_true: &[f64]) -> f64 {
    y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum()
}

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`), with the mean taken over `y_true`.
/// Values are not clamped: a model worse than predicting the mean scores
/// below zero.
///
/// # Examples
///
/// ```
/// use cropyield::metrics::r_squared;
///
/// let y_true = [3.0, -0.5, 2.0, 7.0];
/// let y_pred = [2.5, 0.0, 2.0, 8.0];
/// let r2 = r_squared(&y_pred, &y_true).expect("y_true has variance");
/// assert!(r2 > 0.9);
/// ```
///
/// # Errors
///
/// [`YieldError::DegenerateVariance`] if every `y_true` value is identical,
/// [`YieldError::InvalidDataset`] on empty or mismatched input.
pub fn r_squared(y_pred: &[f64], y_true: &[f64]) -> Result<f64> {
    check_lengths(y_pred, y_true)?;

    let first = y_true[0];
    if y_true.iter().all(|&t| t == first) {
        return Err(YieldError::degenerate_variance("target"));
    }

    let y_mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Err(YieldError::degenerate_variance("target"));
    }

    Ok(1.0 - sum_squared_residuals(y_pred, y_true) / ss_tot)
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true - y_pred)²`
///
/// # Errors
///
/// [`YieldError::InvalidDataset`] on empty or mismatched input.
pub fn mse(y_pred: &[f64], y_true: &[f64]) -> Result<f64> {
    check_lengths(y_pred, y_true)?;
    Ok(sum_squared_residuals(y_pred, y_true) / y_true.len() as f64)
}

/// Computes the Root Mean Squared Error (RMSE), in the target's units.
///
/// # Examples
///
/// ```
/// use cropyield::metrics::rmse;
///
/// let error = rmse(&[2.0, 4.0], &[1.0, 5.0]).expect("same length");
/// assert!((error - 1.0).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// [`YieldError::InvalidDataset`] on empty or mismatched input.
pub fn rmse(y_pred: &[f64], y_true: &[f64]) -> Result<f64> {
    mse(y_pred, y_true).map(f64::sqrt)
}

/// Computes the Mean Absolute Error (MAE).
///
/// # Errors
///
/// [`YieldError::InvalidDataset`] on empty or mismatched input.
pub fn mae(y_pred: &[f64], y_true: &[f64]) -> Result<f64> {
    check_lengths(y_pred, y_true)?;
    let total: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).abs()).sum();
    Ok(total / y_true.len() as f64)
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
