//! Valley depth scores and their normalisation

use crate::config::DepthNormalization;

/// Depth of the valley at every position of a similarity sequence
///
/// From position `i`, climb left while the next value is strictly greater,
/// and likewise to the right. The depth is the sum of both climbs, so it is
/// never negative. A position at the edge climbs on one side only.
pub fn depth_scores(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    (0..n)
        .map(|i| {
            let mut left = i;
            while left > 0 && values[left - 1] > values[left] {
                left -= 1;
            }
            let mut right = i;
            while right + 1 < n && values[right + 1] > values[right] {
                right += 1;
            }
            (values[left] - values[i]) + (values[right] - values[i])
        })
        .collect()
}

/// Normalise depth scores
///
/// Returns `None` when the depths carry no signal: all zero for
/// [`DepthNormalization::Max`], zero variance for
/// [`DepthNormalization::ZScore`].
pub fn normalize(depths: &[f64], normalization: DepthNormalization) -> Option<Vec<f64>> {
    if depths.is_empty() {
        return None;
    }

    match normalization {
        DepthNormalization::Max => {
            let max = depths.iter().cloned().fold(0.0f64, f64::max);
            if max <= 0.0 {
                return None;
            }
            Some(depths.iter().map(|d| d / max).collect())
        }
        DepthNormalization::ZScore => {
            let n = depths.len() as f64;
            let mean = depths.iter().sum::<f64>() / n;
            let variance = depths.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();
            if std <= f64::EPSILON {
                return None;
            }
            Some(depths.iter().map(|d| (d - mean) / std).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_valley() {
        let depths = depth_scores(&[0.9, 0.8, 0.2, 0.7, 0.9]);
        // left peak 0.9, right peak 0.9
        assert!((depths[2] - 1.4).abs() < 1e-12);
        assert_eq!(depths[0], 0.0);
        assert_eq!(depths[4], 0.0);
    }

    #[test]
    fn test_climb_stops_at_nearest_peak() {
        // The climb to the left stops at 0.5, not the global maximum 1.0
        let depths = depth_scores(&[1.0, 0.3, 0.5, 0.1, 0.6]);
        assert!((depths[3] - (0.4 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_depths_non_negative() {
        let depths = depth_scores(&[0.3, 0.1, 0.4, 0.4, 0.2, 0.8, 0.05]);
        assert!(depths.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn test_plateau_stops_climb() {
        let depths = depth_scores(&[0.5, 0.5, 0.1, 0.5]);
        assert!((depths[2] - 0.8).abs() < 1e-12);
        assert_eq!(depths[1], 0.0);
    }

    #[test]
    fn test_normalize_max() {
        let normalized = normalize(&[0.0, 0.5, 1.0], DepthNormalization::Max).unwrap();
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
        assert!(normalize(&[0.0, 0.0], DepthNormalization::Max).is_none());
    }

    #[test]
    fn test_normalize_zscore() {
        let normalized = normalize(&[1.0, 3.0], DepthNormalization::ZScore).unwrap();
        assert!((normalized[0] + 1.0).abs() < 1e-12);
        assert!((normalized[1] - 1.0).abs() < 1e-12);
        assert!(normalize(&[2.0, 2.0, 2.0], DepthNormalization::ZScore).is_none());
        assert!(normalize(&[], DepthNormalization::ZScore).is_none());
    }
}
