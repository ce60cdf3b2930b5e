//! Cropyield: linear crop yield prediction from agronomic features.
//!
//! Cropyield fits an ordinary least-squares model that predicts crop yield
//! (tons/ha) from nitrogen level (kg/ha), rainfall (mm) and average
//! temperature (°C), evaluates it on a seeded hold-out split and makes
//! point predictions for new field conditions.
//!
//! # Quick Start
//!
//! ```
//! use cropyield::prelude::*;
//!
//! // yield = 0.5 + 0.03·N + 0.004·R + 0.08·T
//! let rows: Vec<([f64; 3], f64)> = (0..30)
//!     .map(|i| {
//!         let i = f64::from(i);
//!         let x = [100.0 + 3.0 * i, 600.0 + (i * 41.0) % 300.0, 20.0 + (i * 7.0) % 10.0];
//!         (x, 0.5 + 0.03 * x[0] + 0.004 * x[1] + 0.08 * x[2])
//!     })
//!     .collect();
//! let dataset = Dataset::from_rows(&rows).unwrap();
//!
//! let run = YieldModel::new().train(&dataset).unwrap();
//! assert!(run.report.r2_test > 0.99);
//!
//! let estimate = run.model.predict(&Features::new(150.0, 750.0, 26.0));
//! assert!((estimate - (0.5 + 4.5 + 3.0 + 2.08)).abs() < 1e-6);
//! ```
//!
//! # Modules
//!
//! - [`data`]: Samples, datasets, summaries and CSV loading/export
//! - [`model_selection`]: Seeded train/test splitting
//! - [`linear_model`]: Least-squares fitting, prediction and evaluation
//! - [`metrics`]: R², MSE, RMSE, MAE
//! - [`report`]: Coefficient tables and prediction comparisons
//! - [`config`]: Layered training configuration
//! - [`primitives`]: Dense matrix and Cholesky solver

pub mod config;
pub mod data;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod model_selection;
pub mod prelude;
pub mod primitives;
pub mod report;
pub mod traits;

pub use error::{Result, YieldError};
pub use linear_model::{evaluate, fit, predict, EvaluationReport, FittedModel, YieldModel};
pub use traits::Regressor;
