//! Run configuration and input data.
//!
//! All defaults live here, constructed once at the call boundary and
//! passed by value into the orchestrator. There is no process-wide
//! mutable state; in particular the random seed is scoped to the run.

use crate::error::NestError;
use nest_linalg::DenseMatrix;

/// Resampling strategy for the regression statistic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermuteStrategy {
    /// Permute the rows of y, keep Z and X fixed. Valid when y and the
    /// covariates are exchangeable under the null.
    #[default]
    Simple,
    /// Freedman-Lane: permute residuals of the reduced model Z -> X and
    /// add back the fitted values, preserving the Z-X relationship.
    FreedmanLane,
}

/// Configuration for one enrichment-test run.
#[derive(Debug, Clone)]
pub struct NestConfig {
    /// Nuisance covariates (n x k). `None` means intercept-only: an
    /// all-ones column is used as the default Z.
    pub z: Option<DenseMatrix>,
    /// Number of permutations for the null distribution.
    pub n_perm: usize,
    /// Resampling strategy.
    pub permute_strategy: PermuteStrategy,
    /// Whether to generate the null collection at all.
    pub compute_null: bool,
    /// Exponent applied to |T| when weighting the running sum.
    pub exponent: f64,
    /// Seed for the permutation stream. `None` draws one from entropy;
    /// fix it for bit-for-bit reproducible null collections.
    pub seed: Option<u64>,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            z: None,
            n_perm: 999,
            permute_strategy: PermuteStrategy::Simple,
            compute_null: true,
            exponent: 1.0,
            seed: None,
        }
    }
}

/// Required inputs for the regression statistic generator: the feature
/// matrix X (n samples x m features) and the outcome y (length n).
#[derive(Debug, Clone)]
pub struct RegressionData {
    pub x: DenseMatrix,
    pub y: Vec<f64>,
}

impl RegressionData {
    /// Bundle X and y, checking their shapes against each other.
    pub fn new(x: DenseMatrix, y: Vec<f64>) -> Result<Self, NestError> {
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(NestError::InvalidArgument {
                name: "X (empty feature matrix)".into(),
            });
        }
        if y.len() != x.nrows() {
            return Err(NestError::InvalidArgument {
                name: format!("y (length {} != {} samples in X)", y.len(), x.nrows()),
            });
        }
        Ok(Self { x, y })
    }

    /// Number of samples.
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Number of features.
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }
}

impl NestConfig {
    /// Check the covariate matrix against the data shape. Run before any
    /// fitting so the offending argument is reported by name.
    pub fn validate(&self, data: &RegressionData) -> Result<(), NestError> {
        if let Some(z) = &self.z {
            if z.nrows() != data.n_samples() {
                return Err(NestError::InvalidArgument {
                    name: format!(
                        "Z ({} rows != {} samples in X)",
                        z.nrows(),
                        data.n_samples()
                    ),
                });
            }
        }
        if self.compute_null && self.n_perm == 0 {
            return Err(NestError::InvalidArgument {
                name: "n_perm (must be >= 1 when a null is requested)".into(),
            });
        }
        Ok(())
    }
}
