//! nest-linalg: Linear algebra for NEST-RS
//!
//! Provides the dense matrix wrapper and the least-squares machinery
//! (thin QR, multi-RHS solve) used by the permutation engine to fit one
//! ordinary-least-squares regression per feature column simultaneously.

pub mod dense;
pub mod least_squares;

pub use dense::DenseMatrix;
pub use least_squares::{least_squares, LinalgError, QrDecomp};
