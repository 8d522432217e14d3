//! Dense matrix operations backed by faer.
//!
//! Wraps faer's column-major `Mat<f64>` with the operations the
//! permutation engine uses most: column stacking, row permutation,
//! and matrix products.

use faer::Mat;

/// A dense matrix wrapper around faer's `Mat<f64>`.
///
/// Column-major layout; samples are rows, features (or design columns)
/// are columns throughout the engine.
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    inner: Mat<f64>,
}

impl DenseMatrix {
    /// Create a new dense matrix filled with zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            inner: Mat::zeros(nrows, ncols),
        }
    }

    /// Create a matrix filled with ones (used for intercept columns).
    pub fn ones(nrows: usize, ncols: usize) -> Self {
        Self {
            inner: Mat::from_fn(nrows, ncols, |_, _| 1.0),
        }
    }

    /// Create a dense matrix from a flat slice in row-major order.
    pub fn from_row_major(nrows: usize, ncols: usize, data: &[f64]) -> Self {
        assert_eq!(data.len(), nrows * ncols);
        let inner = Mat::from_fn(nrows, ncols, |i, j| data[i * ncols + j]);
        Self { inner }
    }

    /// Create a single-column matrix from a slice.
    pub fn from_vec(data: &[f64]) -> Self {
        let n = data.len();
        let inner = Mat::from_fn(n, 1, |i, _| data[i]);
        Self { inner }
    }

    /// Number of rows (samples).
    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    /// Number of columns (features / design columns).
    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner.read(row, col)
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner.write(row, col, value);
    }

    /// Get a reference to the underlying faer matrix.
    pub fn as_faer(&self) -> &Mat<f64> {
        &self.inner
    }

    /// Extract column j as a Vec<f64>.
    pub fn col(&self, j: usize) -> Vec<f64> {
        let n = self.nrows();
        let mut v = Vec::with_capacity(n);
        for i in 0..n {
            v.push(self.inner.read(i, j));
        }
        v
    }

    /// Extract row i as a Vec<f64>.
    pub fn row(&self, i: usize) -> Vec<f64> {
        let m = self.ncols();
        let mut v = Vec::with_capacity(m);
        for j in 0..m {
            v.push(self.inner.read(i, j));
        }
        v
    }

    /// Set an entire column from a slice.
    pub fn set_col(&mut self, j: usize, data: &[f64]) {
        assert_eq!(data.len(), self.nrows());
        for (i, &v) in data.iter().enumerate() {
            self.inner.write(i, j, v);
        }
    }

    /// Matrix-vector product: self * v.
    pub fn mat_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(self.ncols(), v.len());
        let n = self.nrows();
        let mut result = vec![0.0; n];
        for j in 0..self.ncols() {
            let vj = v[j];
            for (i, r) in result.iter_mut().enumerate() {
                *r += self.inner.read(i, j) * vj;
            }
        }
        result
    }

    /// Matrix-matrix product: self * other.
    pub fn mat_mul(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.ncols(), other.nrows());
        let result = &self.inner * &other.inner;
        DenseMatrix { inner: result }
    }

    /// Transpose.
    pub fn transpose(&self) -> DenseMatrix {
        let inner = self.inner.transpose().to_owned();
        DenseMatrix { inner }
    }

    /// Element-wise subtraction: self - other.
    pub fn sub(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.nrows(), other.nrows());
        assert_eq!(self.ncols(), other.ncols());
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.inner.read(i, j) - other.inner.read(i, j)
        });
        DenseMatrix { inner }
    }

    /// Element-wise addition: self + other.
    pub fn add(&self, other: &DenseMatrix) -> DenseMatrix {
        assert_eq!(self.nrows(), other.nrows());
        assert_eq!(self.ncols(), other.ncols());
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.inner.read(i, j) + other.inner.read(i, j)
        });
        DenseMatrix { inner }
    }

    /// Stack matrices side by side: [self | others...]. All inputs must
    /// share the same row count.
    pub fn hstack(parts: &[&DenseMatrix]) -> DenseMatrix {
        assert!(!parts.is_empty());
        let nrows = parts[0].nrows();
        let ncols: usize = parts.iter().map(|p| p.ncols()).sum();
        let mut out = DenseMatrix::zeros(nrows, ncols);
        let mut offset = 0;
        for part in parts {
            assert_eq!(part.nrows(), nrows);
            for j in 0..part.ncols() {
                for i in 0..nrows {
                    out.inner.write(i, offset + j, part.inner.read(i, j));
                }
            }
            offset += part.ncols();
        }
        out
    }

    /// Reorder rows by the given index vector: row i of the result is
    /// row perm[i] of self. `perm` must be a permutation of 0..nrows.
    pub fn permute_rows(&self, perm: &[usize]) -> DenseMatrix {
        assert_eq!(perm.len(), self.nrows());
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.inner.read(perm[i], j)
        });
        DenseMatrix { inner }
    }

    /// Dot product of two vectors.
    pub fn dot(a: &[f64], b: &[f64]) -> f64 {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }
}
