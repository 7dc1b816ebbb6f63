//! Gram-Schmidt QR factorization
//!
//! Classical (not modified) Gram-Schmidt: projection coefficients are taken
//! against the original input column, not the partially orthogonalized one.
//! Callers that need reference-identical numerics depend on this.

use crate::matrix::Matrix;

/// Residual norm at or below this threshold marks a column as linearly
/// dependent on the columns before it
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Factor a rectangular matrix into an orthogonal-columns matrix Q and an
/// upper-triangular matrix R
///
/// Q has the input's dimensions; R is square with side length equal to the
/// input's column count. Entries of R below the diagonal are exactly zero.
///
/// Rank-deficient columns get `R[j][j] = 0` and their Q column is left
/// unnormalized, retaining the near-zero residual of the projection step.
/// The degenerate column is deliberately not zeroed out.
///
/// Total for any validated matrix: no error conditions, no I/O.
///
/// # Example
///
/// ```
/// use lematrice::{qr_factorize, Matrix};
///
/// let matrix = Matrix::from_rows(vec![vec![1.0, 1.0], vec![0.0, 1.0]]).unwrap();
/// let (q, r) = qr_factorize(&matrix);
/// assert_eq!(q.as_rows(), &[vec![1.0, 0.0], vec![0.0, 1.0]]);
/// assert_eq!(r.as_rows(), &[vec![1.0, 1.0], vec![0.0, 1.0]]);
/// ```
#[must_use]
pub fn qr_factorize(matrix: &Matrix) -> (Matrix, Matrix) {
    let rows = matrix.row_count();
    let cols = matrix.col_count();
    let a = matrix.as_rows();

    let mut q = vec![vec![0.0; cols]; rows];
    let mut r = vec![vec![0.0; cols]; cols];

    for j in 0..cols {
        // Start from a copy of the input column
        for i in 0..rows {
            q[i][j] = a[i][j];
        }

        // Subtract projections onto the previously orthogonalized columns.
        // The dot product reads the original column a[:,j], not q[:,j].
        for k in 0..j {
            let mut dot = 0.0;
            for i in 0..rows {
                dot += q[i][k] * a[i][j];
            }
            r[k][j] = dot;

            for i in 0..rows {
                q[i][j] -= dot * q[i][k];
            }
        }

        let mut norm = 0.0;
        for i in 0..rows {
            norm += q[i][j] * q[i][j];
        }
        let norm = norm.sqrt();

        if norm > RANK_TOLERANCE {
            r[j][j] = norm;
            for i in 0..rows {
                q[i][j] /= norm;
            }
        } else {
            // Dependent column: diagonal stays zero, residual kept as-is
            r[j][j] = 0.0;
        }
    }

    (
        Matrix::from_rows_unchecked(q),
        Matrix::from_rows_unchecked(r),
    )
}
