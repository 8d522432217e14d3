//! Regression-coefficient statistic generator.
//!
//! Fits one ordinary-least-squares regression per feature column of X
//! against the design [y | Z], all features simultaneously through a
//! single QR factorization. The per-feature statistic is the fitted
//! coefficient on y.
//!
//! Two resampling strategies generate the permutation null:
//!   - simple: permute the rows of y and refit the full model per draw;
//!   - Freedman-Lane: permute residuals of the reduced model Z -> X,
//!     add back the fitted values, and refit against the synthesized X*,
//!     preserving the Z-X relationship under the null.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use nest_linalg::{DenseMatrix, QrDecomp};

use crate::config::{NestConfig, PermuteStrategy, RegressionData};
use crate::error::NestError;
use crate::stat_fun::{StatFunOutput, StatisticGenerator};

/// OLS coefficient generator for the enrichment test.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearModelGenerator;

impl LinearModelGenerator {
    /// Covariate block of the design: the user's Z plus an explicit
    /// intercept column, or a lone all-ones column when Z is absent.
    ///
    /// A user Z that already contains a constant column makes the block
    /// collinear with the intercept; the QR factorization reports that
    /// as a degenerate design.
    fn covariate_block(data: &RegressionData, cfg: &NestConfig) -> DenseMatrix {
        let ones = DenseMatrix::ones(data.n_samples(), 1);
        match &cfg.z {
            Some(z) => DenseMatrix::hstack(&[z, &ones]),
            None => ones,
        }
    }

    /// Draw all permutation index vectors up front from one seeded
    /// generator, so the null is reproducible for any worker count.
    fn draw_permutations(n: usize, n_perm: usize, seed: Option<u64>) -> Vec<Vec<usize>> {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let base: Vec<usize> = (0..n).collect();
        (0..n_perm)
            .map(|_| {
                let mut idx = base.clone();
                idx.shuffle(&mut rng);
                idx
            })
            .collect()
    }

    /// Extract the coefficient on y (design column 0) for every feature.
    fn y_coefficients(coef: &DenseMatrix) -> Vec<f64> {
        coef.row(0)
    }
}

impl StatisticGenerator for LinearModelGenerator {
    fn generate(
        &self,
        data: &RegressionData,
        cfg: &NestConfig,
    ) -> Result<StatFunOutput, NestError> {
        cfg.validate(data)?;

        let y_col = DenseMatrix::from_vec(&data.y);
        let covariates = Self::covariate_block(data, cfg);
        let full_design = DenseMatrix::hstack(&[&y_col, &covariates]);

        debug!(
            n_samples = data.n_samples(),
            n_features = data.n_features(),
            design_cols = full_design.ncols(),
            "fitting full model"
        );

        let qr_full = QrDecomp::new(&full_design)?;
        let t_obs = Self::y_coefficients(&qr_full.solve_matrix(&data.x)?);

        if !cfg.compute_null {
            return Ok(StatFunOutput {
                t_obs,
                t_null: None,
            });
        }

        let perm_indices =
            Self::draw_permutations(data.n_samples(), cfg.n_perm, cfg.seed);

        let t_null = match cfg.permute_strategy {
            PermuteStrategy::Simple => {
                // Permute y, keep Z and X fixed; the design changes per
                // draw so each draw refits from scratch.
                perm_indices
                    .par_iter()
                    .map(|idx| -> Result<Vec<f64>, NestError> {
                        let y_perm = y_col.permute_rows(idx);
                        let design = DenseMatrix::hstack(&[&y_perm, &covariates]);
                        let qr = QrDecomp::new(&design)?;
                        Ok(Self::y_coefficients(&qr.solve_matrix(&data.x)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            PermuteStrategy::FreedmanLane => {
                // Reduced model Z -> X fitted once; draws permute its
                // residuals and reuse the fixed full-design factorization.
                let qr_reduced = QrDecomp::new(&covariates)?;
                let coef_reduced = qr_reduced.solve_matrix(&data.x)?;
                let fitted = covariates.mat_mul(&coef_reduced);
                let residuals = data.x.sub(&fitted);

                debug!(strategy = "freedman_lane", "reduced model fitted");

                perm_indices
                    .par_iter()
                    .map(|idx| -> Result<Vec<f64>, NestError> {
                        let x_star = fitted.add(&residuals.permute_rows(idx));
                        Ok(Self::y_coefficients(&qr_full.solve_matrix(&x_star)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(StatFunOutput {
            t_obs,
            t_null: Some(t_null),
        })
    }
}
