//! Least-squares fitting via thin QR decomposition.
//!
//! The permutation engine fits one ordinary-least-squares regression per
//! feature column of X against a shared design matrix. The design is
//! factored once (modified Gram-Schmidt QR) and reused across all
//! right-hand sides, so a run with thousands of features costs one
//! decomposition plus cheap back-substitutions.

use crate::dense::DenseMatrix;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinalgError {
    #[error("degenerate design: column {col} is (numerically) linearly dependent")]
    DegenerateDesign { col: usize },

    #[error("design has {nrows} rows but {ncols} columns; need more rows than columns")]
    Underdetermined { nrows: usize, ncols: usize },

    #[error("dimension mismatch: expected {expected} rows, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Result of a thin QR decomposition: A = Q * R with Q m x n orthonormal
/// and R n x n upper triangular.
pub struct QrDecomp {
    pub q: DenseMatrix,
    pub r: DenseMatrix,
}

impl QrDecomp {
    /// Compute the thin QR decomposition of an m x n matrix.
    /// Uses modified Gram-Schmidt; a near-zero column norm signals a
    /// rank-deficient design and fails rather than dividing by ~0.
    pub fn new(a: &DenseMatrix) -> Result<Self, LinalgError> {
        let m = a.nrows();
        let n = a.ncols();
        if m <= n {
            return Err(LinalgError::Underdetermined { nrows: m, ncols: n });
        }

        let mut q = DenseMatrix::zeros(m, n);
        let mut r = DenseMatrix::zeros(n, n);

        let mut cols: Vec<Vec<f64>> = (0..n).map(|j| a.col(j)).collect();

        for j in 0..n {
            for i in 0..j {
                let q_col = q.col(i);
                let rij = DenseMatrix::dot(&q_col, &cols[j]);
                r.set(i, j, rij);
                for k in 0..m {
                    cols[j][k] -= rij * q_col[k];
                }
            }

            let norm = DenseMatrix::dot(&cols[j], &cols[j]).sqrt();
            if norm < 1e-12 {
                return Err(LinalgError::DegenerateDesign { col: j });
            }
            r.set(j, j, norm);
            for k in 0..m {
                q.set(k, j, cols[j][k] / norm);
            }
        }

        Ok(QrDecomp { q, r })
    }

    /// Least-squares solve for a single right-hand side:
    /// x = argmin ||A x - b||, via R * x = Q' * b.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
        if b.len() != self.q.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.q.nrows(),
                got: b.len(),
            });
        }
        let qtb = self.q.transpose().mat_vec(b);
        Ok(self.back_substitute(&qtb))
    }

    /// Least-squares solve for every column of B at once. Returns the
    /// n x k coefficient matrix for a k-column right-hand side.
    pub fn solve_matrix(&self, b: &DenseMatrix) -> Result<DenseMatrix, LinalgError> {
        if b.nrows() != self.q.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.q.nrows(),
                got: b.nrows(),
            });
        }
        let qtb = self.q.transpose().mat_mul(b);
        let n = self.r.nrows();
        let mut coef = DenseMatrix::zeros(n, b.ncols());
        for j in 0..b.ncols() {
            let x = self.back_substitute(&qtb.col(j));
            coef.set_col(j, &x);
        }
        Ok(coef)
    }

    /// Back substitution: R * x = rhs, with R upper triangular.
    fn back_substitute(&self, rhs: &[f64]) -> Vec<f64> {
        let n = self.r.nrows();
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += self.r.get(i, j) * x[j];
            }
            x[i] = (rhs[i] - sum) / self.r.get(i, i);
        }
        x
    }
}

/// Fit the multi-output least-squares problem `design -> targets`.
///
/// Returns the (design-cols x target-cols) coefficient matrix: column j
/// holds the fitted coefficients for target column j.
pub fn least_squares(
    design: &DenseMatrix,
    targets: &DenseMatrix,
) -> Result<DenseMatrix, LinalgError> {
    let qr = QrDecomp::new(design)?;
    qr.solve_matrix(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_orthonormal() {
        let a = DenseMatrix::from_row_major(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let qr = QrDecomp::new(&a).unwrap();
        let qtq = qr.q.transpose().mat_mul(&qr.q);
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (qtq.get(i, j) - expected).abs() < 1e-10,
                    "Q'Q[{},{}] = {}",
                    i,
                    j,
                    qtq.get(i, j)
                );
            }
        }
    }

    #[test]
    fn test_qr_reconstructs() {
        let a = DenseMatrix::from_row_major(4, 2, &[1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0]);
        let qr = QrDecomp::new(&a).unwrap();
        let prod = qr.q.mat_mul(&qr.r);
        for i in 0..4 {
            for j in 0..2 {
                assert!((prod.get(i, j) - a.get(i, j)).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_solve_exact_line() {
        // y = 2 + 3x recovered exactly from noiseless data
        let design = DenseMatrix::from_row_major(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let b = vec![2.0, 5.0, 8.0, 11.0];
        let qr = QrDecomp::new(&design).unwrap();
        let x = qr.solve(&b).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-10);
        assert!((x[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_solve_satisfies_normal_equations() {
        let a = DenseMatrix::from_row_major(3, 2, &[1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let b = vec![1.0, 2.0, 2.0];
        let qr = QrDecomp::new(&a).unwrap();
        let x = qr.solve(&b).unwrap();
        // Check A'Ax = A'b
        let ata = a.transpose().mat_mul(&a);
        let atb = a.transpose().mat_vec(&b);
        let atax = ata.mat_vec(&x);
        for i in 0..2 {
            assert!((atax[i] - atb[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_solve_matrix_matches_columnwise() {
        let a = DenseMatrix::from_row_major(4, 2, &[1.0, 0.5, 1.0, 1.5, 1.0, 2.5, 1.0, 4.0]);
        let b = DenseMatrix::from_row_major(4, 3, &[
            1.0, 2.0, 0.0, //
            2.0, 1.0, 1.0, //
            3.0, 0.0, 0.0, //
            4.0, -1.0, 2.0,
        ]);
        let qr = QrDecomp::new(&a).unwrap();
        let coef = qr.solve_matrix(&b).unwrap();
        for j in 0..3 {
            let single = qr.solve(&b.col(j)).unwrap();
            for i in 0..2 {
                assert!((coef.get(i, j) - single[i]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_least_squares_helper() {
        // Two targets sharing the design; coefficients recovered per column.
        let design = DenseMatrix::from_row_major(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let targets = DenseMatrix::from_row_major(4, 2, &[
            2.0, -1.0, //
            5.0, 0.0, //
            8.0, 1.0, //
            11.0, 2.0,
        ]);
        let coef = least_squares(&design, &targets).unwrap();
        assert!((coef.get(0, 0) - 2.0).abs() < 1e-10);
        assert!((coef.get(1, 0) - 3.0).abs() < 1e-10);
        assert!((coef.get(0, 1) + 1.0).abs() < 1e-10);
        assert!((coef.get(1, 1) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_collinear_design_fails() {
        // Second column is 2x the first: rank deficient
        let a = DenseMatrix::from_row_major(4, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0]);
        assert!(matches!(
            QrDecomp::new(&a),
            Err(LinalgError::DegenerateDesign { col: 1 })
        ));
    }

    #[test]
    fn test_underdetermined_fails() {
        // 2 rows, 3 columns: more unknowns than equations
        let a = DenseMatrix::from_row_major(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(matches!(
            QrDecomp::new(&a),
            Err(LinalgError::Underdetermined { .. })
        ));
    }
}
