//! Matrix type for 2D numeric data.

use crate::error::{Result, YieldError};

/// Pivots below this fraction of their original diagonal entry are treated
/// as zero during Cholesky factorisation.
pub(crate) const PIVOT_TOLERANCE: f64 = 1e-10;

/// A 2D matrix of `f64` values (row-major storage).
///
/// # Examples
///
/// ```
/// use cropyield::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("6 = 2 * 3");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Creates a new matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(YieldError::invalid_dataset(format!(
                "matrix data length {} does not match {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix whose rows are the given fixed-width arrays.
    #[must_use]
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        Self {
            data: rows.iter().flatten().copied().collect(),
            rows: rows.len(),
            cols: N,
        }
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Borrows one row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner dimensions differ.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(YieldError::invalid_dataset(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut result = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                for j in 0..other.cols {
                    result[i * other.cols + j] += a * other.get(k, j);
                }
            }
        }

        Ok(Self {
            data: result,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector length differs from the column count.
    pub fn matvec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if self.cols != v.len() {
            return Err(YieldError::invalid_dataset(format!(
                "matrix has {} columns but vector has {} entries",
                self.cols,
                v.len()
            )));
        }

        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Solves `A x = b` for symmetric positive definite `A` by Cholesky
    /// decomposition `A = L Lᵀ`.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::SingularFit`] when a pivot is non-positive or
    /// vanishes relative to its diagonal entry (rank-deficient `A`), and
    /// [`YieldError::InvalidDataset`] on shape mismatch.
    pub fn cholesky_solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        if self.rows != self.cols {
            return Err(YieldError::invalid_dataset(format!(
                "Cholesky needs a square matrix, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.rows != b.len() {
            return Err(YieldError::invalid_dataset(format!(
                "right-hand side has {} entries for a {n}x{n} system",
                b.len(),
                n = self.rows
            )));
        }

        let n = self.rows;
        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let sum: f64 = (0..j).map(|k| l[i * n + k] * l[j * n + k]).sum();

                if i == j {
                    let original = self.get(j, j);
                    let pivot = original - sum;
                    if pivot <= 0.0 || pivot <= PIVOT_TOLERANCE * original.abs() {
                        return Err(YieldError::singular(format!(
                            "matrix is not positive definite (pivot {j} = {pivot:e})"
                        )));
                    }
                    l[j * n + j] = pivot.sqrt();
                } else {
                    l[i * n + j] = (self.get(i, j) - sum) / l[j * n + j];
                }
            }
        }

        // L y = b
        let mut y = vec![0.0; n];
        for i in 0..n {
            let sum: f64 = (0..i).map(|j| l[i * n + j] * y[j]).sum();
            y[i] = (b[i] - sum) / l[i * n + i];
        }

        // Lᵀ x = y
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let sum: f64 = ((i + 1)..n).map(|j| l[j * n + i] * x[j]).sum();
            x[i] = (y[i] - sum) / l[i * n + i];
        }

        Ok(x)
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
