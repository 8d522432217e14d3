//! Weighted running-sum enrichment score.
//!
//! Adapted from gene-set enrichment analysis to signed per-feature
//! statistics and binary network membership: features are ranked by
//! statistic, a weighted "hit" trajectory is accumulated over in-network
//! positions and an unweighted "miss" trajectory over out-of-network
//! positions, and the enrichment score is the maximum absolute deviation
//! of their difference.

use crate::error::NestError;
use crate::network::NetworkMask;

/// Enrichment score together with the full running-sum trajectory.
#[derive(Debug, Clone)]
pub struct EnrichmentScore {
    /// Maximum absolute value of the running sum. Always in [0, 1].
    pub es: f64,
    /// Hit-minus-miss trajectory, one value per rank position.
    pub running_sum: Vec<f64>,
}

/// Compute the enrichment score of statistic vector `t` against `mask`.
///
/// Features are sorted by statistic value, descending. The sort is
/// stable: features with exactly equal statistics keep their input
/// order, so results are deterministic under ties. NaN statistics sort
/// below every finite value (IEEE total order).
///
/// At each rank position the running sum is the in-network cumulative
/// weight fraction (weights `|t|^exponent`) minus the out-of-network
/// cumulative count fraction. Both trajectories end at exactly 1, so
/// the running sum ends at exactly 0.
///
/// Fails with [`NestError::ZeroMass`] when the total in-network weight
/// is zero, which would otherwise propagate NaN through the hit
/// trajectory.
pub fn enrichment_score(
    t: &[f64],
    mask: &NetworkMask,
    exponent: f64,
) -> Result<EnrichmentScore, NestError> {
    if t.len() != mask.len() {
        return Err(NestError::MaskLengthMismatch {
            mask_len: mask.len(),
            n_features: t.len(),
        });
    }
    let m = t.len();

    // Stable descending order; ties retain input order.
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| t[b].total_cmp(&t[a]));

    let weights: Vec<f64> = order.iter().map(|&i| t[i].abs().powf(exponent)).collect();

    let hit_total: f64 = order
        .iter()
        .zip(weights.iter())
        .filter(|(&i, _)| mask.is_inside(i))
        .map(|(_, &w)| w)
        .sum();
    if hit_total <= 0.0 || !hit_total.is_finite() {
        return Err(NestError::ZeroMass);
    }
    let miss_total = (m - mask.n_inside()) as f64;

    let mut running_sum = Vec::with_capacity(m);
    let mut hit_cum = 0.0;
    let mut miss_cum = 0.0;
    let mut es = 0.0;
    for (&i, &w) in order.iter().zip(weights.iter()) {
        if mask.is_inside(i) {
            hit_cum += w;
        } else {
            miss_cum += 1.0;
        }
        let rs = hit_cum / hit_total - miss_cum / miss_total;
        if rs.abs() > es {
            es = rs.abs();
        }
        running_sum.push(rs);
    }

    Ok(EnrichmentScore { es, running_sum })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(values: &[f64]) -> NetworkMask {
        NetworkMask::from_values(values).unwrap()
    }

    #[test]
    fn test_descending_scenario() {
        // Already-sorted statistics with the two largest in-network.
        let t = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        let m = mask(&[1.0, 1.0, 0.0, 0.0, 0.0]);
        let out = enrichment_score(&t, &m, 1.0).unwrap();

        let expected = [5.0 / 9.0, 1.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
        assert_eq!(out.running_sum.len(), 5);
        for (got, want) in out.running_sum.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
        assert!((out.es - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_running_sum_ends_at_zero() {
        let t = vec![-2.0, 0.5, 3.0, 1.0, -1.0, 0.1];
        let m = mask(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let out = enrichment_score(&t, &m, 1.0).unwrap();
        assert!(out.running_sum.last().unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_es_bounds() {
        let t = vec![0.3, -1.2, 2.5, -0.4, 1.1];
        let m = mask(&[1.0, 0.0, 1.0, 0.0, 0.0]);
        let out = enrichment_score(&t, &m, 1.0).unwrap();
        assert!(out.es >= 0.0 && out.es <= 1.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Two exactly tied values, one in-network and one out. The stable
        // sort keeps the earlier feature first, so swapping their mask
        // assignment changes which side of the tie accumulates first.
        let t = vec![2.0, 2.0, 1.0, 0.5];
        let in_first = enrichment_score(&t, &mask(&[1.0, 0.0, 0.0, 1.0]), 1.0).unwrap();
        let out_first = enrichment_score(&t, &mask(&[0.0, 1.0, 0.0, 1.0]), 1.0).unwrap();

        // in_first: ranks are features [0,1,2,3]; hit mass 2.5.
        // position 0: 2/2.5 - 0 = 0.8
        assert!((in_first.running_sum[0] - 0.8).abs() < 1e-12);
        // out_first: feature 0 (out) still ranks first: 0 - 1/2 = -0.5
        assert!((out_first.running_sum[0] + 0.5).abs() < 1e-12);
        // Trajectories differ under exact ties, deterministically.
        assert!((in_first.es - out_first.es).abs() > 1e-6);
    }

    #[test]
    fn test_tied_runs_are_reproducible() {
        let t = vec![1.0; 6];
        let m = mask(&[1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        let a = enrichment_score(&t, &m, 1.0).unwrap();
        let b = enrichment_score(&t, &m, 1.0).unwrap();
        assert_eq!(a.running_sum, b.running_sum);
        assert_eq!(a.es, b.es);
    }

    #[test]
    fn test_zero_mass_fails() {
        // Every in-network statistic is exactly 0: hit mass is 0.
        let t = vec![0.0, 1.0, 0.0, -2.0];
        let m = mask(&[1.0, 0.0, 1.0, 0.0]);
        assert!(matches!(
            enrichment_score(&t, &m, 1.0),
            Err(NestError::ZeroMass)
        ));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let t = vec![1.0, 2.0];
        let m = mask(&[1.0, 0.0, 1.0]);
        assert!(matches!(
            enrichment_score(&t, &m, 1.0),
            Err(NestError::MaskLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_exponent_zero_counts_hits() {
        // exponent 0 reduces the hit trajectory to a pure count fraction
        let t = vec![5.0, 4.0, 3.0, 2.0];
        let m = mask(&[1.0, 0.0, 0.0, 1.0]);
        let out = enrichment_score(&t, &m, 0.0).unwrap();
        let expected = [0.5, 0.0, -0.5, 0.0];
        for (got, want) in out.running_sum.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_perfect_separation_near_one() {
        // All in-network statistics strictly above all out-of-network.
        let m_features = 100;
        let t: Vec<f64> = (0..m_features).map(|i| (m_features - i) as f64).collect();
        let labels: Vec<f64> = (0..m_features)
            .map(|i| if i < 20 { 1.0 } else { 0.0 })
            .collect();
        let out = enrichment_score(&t, &mask(&labels), 1.0).unwrap();
        assert!(out.es > 0.95, "ES = {}", out.es);
    }
}
