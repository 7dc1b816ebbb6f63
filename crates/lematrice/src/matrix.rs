//! Rectangular matrix type with shape validation

use serde::Serialize;
use thiserror::Error;

/// Errors produced when constructing a matrix from raw rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Zero rows, or the first row has zero columns
    #[error("Matrix is empty")]
    Empty,

    /// A row's length differs from the first row's length
    #[error("Matrix must be rectangular: row {row} has {got} columns, expected {expected}")]
    Ragged {
        /// Index of the offending row
        row: usize,
        /// Length of the offending row
        got: usize,
        /// Length of the first row
        expected: usize,
    },
}

/// Rectangular matrix of `f64` values
///
/// Invariants guaranteed after construction: at least one row, at least one
/// column, and every row the same length. Serializes transparently as a
/// nested array (`[[...], ...]`) matching the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Build a matrix from raw rows, enforcing rectangularity
    ///
    /// # Arguments
    ///
    /// * `rows` - Row-major values as decoded from a request body
    ///
    /// # Returns
    ///
    /// `Ok(Matrix)` if the rows form a non-empty rectangular matrix,
    /// `Err(MatrixError)` otherwise
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(MatrixError::Empty);
        }

        let expected = rows[0].len();
        for (row, values) in rows.iter().enumerate().skip(1) {
            if values.len() != expected {
                return Err(MatrixError::Ragged {
                    row,
                    got: values.len(),
                    expected,
                });
            }
        }

        Ok(Self { rows })
    }

    /// Build a matrix from rows already known to be rectangular
    ///
    /// Used by the factorization engine, which constructs outputs with
    /// fixed dimensions.
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(!rows.is_empty() && !rows[0].is_empty());
        Self { rows }
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Row-major view of the values
    #[must_use]
    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Value at (row, col)
    ///
    /// Panics if out of bounds, like slice indexing.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Euclidean norm of column `col`
    #[must_use]
    pub fn col_norm(&self, col: usize) -> f64 {
        self.rows
            .iter()
            .map(|row| row[col] * row[col])
            .sum::<f64>()
            .sqrt()
    }
}
