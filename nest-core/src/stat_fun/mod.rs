//! Pluggable statistic generators.
//!
//! A generator produces the observed per-feature statistic vector and,
//! when a null is requested, one statistic vector per permutation. The
//! regression generator lives here; GAM and user-supplied generators are
//! external and plug in through the same [`StatisticGenerator`] contract.

pub mod linear;

pub use linear::LinearModelGenerator;

use crate::config::{NestConfig, RegressionData};
use crate::error::NestError;

/// Output contract shared by every statistic generator.
#[derive(Debug, Clone)]
pub struct StatFunOutput {
    /// Observed statistic, one scalar per feature.
    pub t_obs: Vec<f64>,
    /// Null collection: `n_perm` statistic vectors, one per permutation.
    /// `None` when the null was not requested.
    pub t_null: Option<Vec<Vec<f64>>>,
}

impl StatFunOutput {
    /// Check the output shape against the run's data and configuration.
    /// A generator violating this is a contract error, not a silent
    /// mismatch downstream.
    pub fn validate(&self, n_features: usize, cfg: &NestConfig) -> Result<(), NestError> {
        if self.t_obs.len() != n_features {
            return Err(NestError::ContractViolation {
                reason: format!("T_obs has length {}", self.t_obs.len()),
                expected: n_features,
            });
        }
        match (&self.t_null, cfg.compute_null) {
            (Some(null), true) => {
                if null.len() != cfg.n_perm {
                    return Err(NestError::ContractViolation {
                        reason: format!(
                            "T_null has {} vectors, n_perm is {}",
                            null.len(),
                            cfg.n_perm
                        ),
                        expected: n_features,
                    });
                }
                for (i, t) in null.iter().enumerate() {
                    if t.len() != n_features {
                        return Err(NestError::ContractViolation {
                            reason: format!("T_null[{i}] has length {}", t.len()),
                            expected: n_features,
                        });
                    }
                }
                Ok(())
            }
            (None, true) => Err(NestError::MissingNull),
            (_, false) => Ok(()),
        }
    }
}

/// Capability contract for statistic generators: one required operation.
pub trait StatisticGenerator {
    fn generate(
        &self,
        data: &RegressionData,
        cfg: &NestConfig,
    ) -> Result<StatFunOutput, NestError>;
}
