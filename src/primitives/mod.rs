//! Dense linear algebra primitives.
//!
//! Only what the normal equations need: a row-major `f64` matrix with
//! products and a Cholesky solver.

mod matrix;

pub use matrix::Matrix;
