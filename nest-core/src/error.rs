//! Error taxonomy for the enrichment test.
//!
//! Every failure mode is reported to the caller as a typed error; the
//! engine never returns a partial result and never retries (permutation
//! draws are deterministic given the seed, not flaky operations).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NestError {
    #[error("invalid network mask: {reason}")]
    InvalidMembership { reason: String },

    #[error(
        "network mask has {mask_len} entries but X has {n_features} feature columns; \
         the mask must have one entry per feature"
    )]
    MaskLengthMismatch { mask_len: usize, n_features: usize },

    #[error("missing or misspecified argument: {name}")]
    InvalidArgument { name: String },

    #[error("unsupported statistic generator: {name:?}")]
    UnsupportedStatistic { name: String },

    #[error("statistic generator {name:?} is not implemented")]
    NotImplemented { name: String },

    #[error(
        "statistic generator violated its output contract: {reason} \
         (expected vectors of length {expected})"
    )]
    ContractViolation { reason: String, expected: usize },

    #[error("generator produced no null collection but a p-value was requested")]
    MissingNull,

    #[error(
        "total in-network weighted mass is zero; the hit trajectory cannot \
         be normalized (all in-network statistics are 0 under this exponent)"
    )]
    ZeroMass,

    #[error("degenerate design: {0}")]
    DegenerateDesign(#[from] nest_linalg::LinalgError),
}
