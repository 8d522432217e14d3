//! Permutation p-value estimation.

/// Add-one-smoothed permutation p-value.
///
/// Counts null draws strictly greater than the observed score, so ties
/// with the observed value count against significance. The +1 in both
/// numerator and denominator keeps the estimate in [1/(K+1), 1]: never
/// exactly zero even when the observed score beats every null draw.
pub fn permutation_pvalue(es_obs: f64, null: &[f64]) -> f64 {
    let k = null.len();
    let n_exceed = null.iter().filter(|&&n| n > es_obs).count();
    (1.0 + n_exceed as f64) / (1.0 + k as f64)
}
