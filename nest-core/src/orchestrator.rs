//! Run orchestration: generator dispatch, scoring, p-value assembly.
//!
//! The orchestrator validates the network mask against the data,
//! dispatches the selected statistic generator, scores the observed and
//! null statistic vectors, and assembles the final result. Enrichment
//! scores stay keyed by network identifier even though a run currently
//! declares a single network, so the contract extends to multiple
//! simultaneous regions without changing shape.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::{NestConfig, RegressionData};
use crate::enrich::enrichment_score;
use crate::error::NestError;
use crate::network::NetworkMask;
use crate::pvalue::permutation_pvalue;
use crate::stat_fun::{LinearModelGenerator, StatisticGenerator};

/// Statistic-generator selector: a closed set of variants behind one
/// capability contract.
pub enum StatFun<'a> {
    /// Regression-coefficient generator (in scope, implemented here).
    Lm,
    /// GAM delta-R-squared generator. External; selecting it reports a
    /// not-implemented condition without invoking anything.
    GamDeltaRsq,
    /// Caller-supplied generator satisfying the same output contract.
    Custom(&'a dyn StatisticGenerator),
}

impl<'a> StatFun<'a> {
    /// Parse a selector from its string key. Unknown keys fail with an
    /// unsupported-statistic condition.
    pub fn from_name(name: &str) -> Result<Self, NestError> {
        match name {
            "lm" => Ok(StatFun::Lm),
            "gam_mnwald" => Ok(StatFun::GamDeltaRsq),
            other => Err(NestError::UnsupportedStatistic {
                name: other.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StatFun::Lm => "lm",
            StatFun::GamDeltaRsq => "gam_mnwald",
            StatFun::Custom(_) => "custom",
        }
    }
}

/// Result of one enrichment-test run.
#[derive(Debug, Clone)]
pub struct NestOutput {
    /// Permutation p-value for the tested network.
    pub pvalue: f64,
    /// Observed enrichment score, keyed by network identifier.
    pub es_obs: BTreeMap<String, f64>,
    /// Null enrichment scores, keyed by network identifier.
    pub es_null: BTreeMap<String, Vec<f64>>,
    /// Running-sum trajectory of the observed statistic.
    pub running_sum_obs: Vec<f64>,
}

/// Run the network enrichment significance test end to end.
///
/// Control flow: statistic generator -> (T_obs, T_null) -> enrichment
/// scorer applied to the observed vector and to every null vector ->
/// add-one-smoothed permutation p-value.
pub fn nest(
    stat_fun: StatFun,
    data: &RegressionData,
    mask: &NetworkMask,
    cfg: &NestConfig,
) -> Result<NestOutput, NestError> {
    if mask.len() != data.n_features() {
        return Err(NestError::MaskLengthMismatch {
            mask_len: mask.len(),
            n_features: data.n_features(),
        });
    }
    cfg.validate(data)?;

    info!(
        stat_fun = stat_fun.name(),
        network = mask.label(),
        n_perm = cfg.n_perm,
        strategy = ?cfg.permute_strategy,
        "running enrichment test"
    );

    let output = match &stat_fun {
        StatFun::Lm => LinearModelGenerator.generate(data, cfg)?,
        StatFun::GamDeltaRsq => {
            return Err(NestError::NotImplemented {
                name: "gam_mnwald".to_string(),
            })
        }
        StatFun::Custom(generator) => generator.generate(data, cfg)?,
    };
    output.validate(data.n_features(), cfg)?;

    let t_null = output.t_null.as_ref().ok_or(NestError::MissingNull)?;

    let observed = enrichment_score(&output.t_obs, mask, cfg.exponent)?;
    debug!(es_obs = observed.es, "observed statistic scored");

    let mut null_scores = Vec::with_capacity(t_null.len());
    for t in t_null {
        null_scores.push(enrichment_score(t, mask, cfg.exponent)?.es);
    }

    let pvalue = permutation_pvalue(observed.es, &null_scores);
    info!(pvalue, es_obs = observed.es, "enrichment test complete");

    let mut es_obs = BTreeMap::new();
    es_obs.insert(mask.label().to_string(), observed.es);
    let mut es_null = BTreeMap::new();
    es_null.insert(mask.label().to_string(), null_scores);

    Ok(NestOutput {
        pvalue,
        es_obs,
        es_null,
        running_sum_obs: observed.running_sum,
    })
}
