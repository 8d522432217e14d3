//! nest-core: Network Enrichment Significance Testing
//!
//! Implements the permutation-based enrichment test for mass-univariate
//! statistics: a weighted running-sum enrichment score over ranked
//! per-feature statistics, permutation null generation for the regression
//! case (simple and Freedman-Lane resampling), and the add-one-smoothed
//! permutation p-value.

pub mod config;
pub mod enrich;
pub mod error;
pub mod network;
pub mod orchestrator;
pub mod pvalue;
pub mod stat_fun;

pub use config::{NestConfig, PermuteStrategy, RegressionData};
pub use enrich::{enrichment_score, EnrichmentScore};
pub use error::NestError;
pub use network::NetworkMask;
pub use orchestrator::{nest, NestOutput, StatFun};
pub use pvalue::permutation_pvalue;
pub use stat_fun::{LinearModelGenerator, StatFunOutput, StatisticGenerator};
