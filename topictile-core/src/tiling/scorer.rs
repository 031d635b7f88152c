//! TextTiling boundary scorer

use super::depth::{depth_scores, normalize};
use super::smoothing::smooth;
use crate::config::TilingParams;
use crate::error::Result;
use crate::observer::{EvaluationObserver, Event};
use crate::similarity::SimilarityProvider;
use crate::types::Meeting;

/// Minimum number of utterance groups needed to score a meeting
pub const MIN_GROUPS: usize = 3;

/// Intermediate arrays of one scoring pass, kept for inspection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TilingTrace {
    /// Raw similarity per gap
    pub similarities: Vec<f64>,
    /// Smoothed similarity per gap
    pub smoothed: Vec<f64>,
    /// Depth score per gap
    pub depths: Vec<f64>,
    /// Selected boundary indices
    pub boundaries: Vec<usize>,
}

/// Turns a meeting into topic boundaries from a similarity sequence
#[derive(Debug, Clone, Default)]
pub struct BoundaryScorer {
    params: TilingParams,
}

impl BoundaryScorer {
    /// Create a scorer with the given hyperparameters
    pub fn new(params: TilingParams) -> Self {
        Self { params }
    }

    /// Hyperparameters in use
    pub fn params(&self) -> &TilingParams {
        &self.params
    }

    /// Score a meeting and return sorted boundary indices
    pub fn score(
        &self,
        meeting: &Meeting,
        provider: &dyn SimilarityProvider,
        observer: &dyn EvaluationObserver,
    ) -> Result<Vec<usize>> {
        Ok(self.trace(meeting, provider, observer)?.boundaries)
    }

    /// Score a meeting and keep every intermediate array
    pub fn trace(
        &self,
        meeting: &Meeting,
        provider: &dyn SimilarityProvider,
        observer: &dyn EvaluationObserver,
    ) -> Result<TilingTrace> {
        let group_count = meeting.group_count();
        if group_count < MIN_GROUPS {
            observer.on_event(&Event::DegenerateMeeting {
                meeting_id: meeting.id.clone(),
                group_count,
            });
            return Ok(TilingTrace::default());
        }

        let similarities = provider.sequence(&meeting.texts(), self.params.comparison_window)?;
        let smoothed = smooth(
            &similarities,
            self.params.smoothing_window,
            self.params.smoothing_passes,
        );
        let depths = depth_scores(&smoothed);
        let boundaries = self.select_boundaries(&depths, group_count);

        Ok(TilingTrace {
            similarities,
            smoothed,
            depths,
            boundaries,
        })
    }

    /// Threshold normalised depths and apply the cap
    ///
    /// Depth `j` belongs to the gap before group `j + 1`, so a selected gap
    /// becomes boundary index `j + 1`.
    pub fn select_boundaries(&self, depths: &[f64], group_count: usize) -> Vec<usize> {
        let Some(normalized) = normalize(depths, self.params.normalization) else {
            return Vec::new();
        };

        let mut candidates: Vec<(usize, f64)> = normalized
            .iter()
            .enumerate()
            .filter(|(_, &score)| score > self.params.threshold)
            .map(|(gap, _)| (gap + 1, depths[gap]))
            .collect();

        if let Some(limit) = self.params.cap.limit(group_count) {
            if candidates.len() > limit {
                candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                candidates.truncate(limit);
            }
        }

        let mut boundaries: Vec<usize> = candidates.into_iter().map(|(index, _)| index).collect();
        boundaries.sort_unstable();
        boundaries.dedup();
        boundaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DepthNormalization, SegmentCap};
    use crate::error::Result;
    use crate::observer::RecordingObserver;
    use crate::similarity::LexicalSimilarity;

    /// Provider that replays a fixed similarity sequence
    struct FixedSimilarity(Vec<f64>);

    impl SimilarityProvider for FixedSimilarity {
        fn similarity(&self, _a: &[&str], _b: &[&str]) -> Result<f64> {
            Ok(0.0)
        }

        fn sequence(&self, _texts: &[&str], _window: usize) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn unsmoothed(threshold: f64, cap: SegmentCap) -> TilingParams {
        TilingParams {
            smoothing_window: 0,
            threshold,
            cap,
            ..TilingParams::default()
        }
    }

    fn meeting(n: usize) -> Meeting {
        Meeting::from_texts("m", (0..n).map(|i| format!("text {i}")))
    }

    #[test]
    fn test_selects_deepest_valleys() {
        let scorer = BoundaryScorer::new(unsmoothed(0.5, SegmentCap::Disabled));
        let provider = FixedSimilarity(vec![0.9, 0.2, 0.9, 0.9, 0.3, 0.9, 0.8]);
        let boundaries = scorer
            .score(&meeting(8), &provider, &RecordingObserver::new())
            .unwrap();
        assert_eq!(boundaries, vec![2, 5]);
    }

    #[test]
    fn test_cap_keeps_highest_depths() {
        let scorer = BoundaryScorer::new(unsmoothed(0.1, SegmentCap::Fixed { max_boundaries: 1 }));
        let provider = FixedSimilarity(vec![0.9, 0.2, 0.9, 0.9, 0.1, 0.9, 0.8]);
        let boundaries = scorer
            .score(&meeting(8), &provider, &RecordingObserver::new())
            .unwrap();
        assert_eq!(boundaries, vec![5]);
    }

    #[test]
    fn test_cap_ties_prefer_earliest() {
        let scorer = BoundaryScorer::new(unsmoothed(0.1, SegmentCap::Fixed { max_boundaries: 2 }));
        let boundaries = scorer.select_boundaries(&[0.0, 1.0, 0.0, 1.0, 0.0, 1.0], 7);
        assert_eq!(boundaries, vec![2, 4]);
    }

    #[test]
    fn test_degenerate_meeting() {
        let scorer = BoundaryScorer::default();
        let observer = RecordingObserver::new();
        let boundaries = scorer
            .score(&meeting(2), &LexicalSimilarity::new(), &observer)
            .unwrap();
        assert!(boundaries.is_empty());
        assert_eq!(
            observer.events(),
            vec![Event::DegenerateMeeting {
                meeting_id: "m".into(),
                group_count: 2
            }]
        );
    }

    #[test]
    fn test_flat_similarity_yields_nothing() {
        let scorer = BoundaryScorer::new(unsmoothed(0.0, SegmentCap::Disabled));
        let provider = FixedSimilarity(vec![0.5; 5]);
        let boundaries = scorer
            .score(&meeting(6), &provider, &RecordingObserver::new())
            .unwrap();
        assert!(boundaries.is_empty());
    }

    #[test]
    fn test_zscore_normalization() {
        let params = TilingParams {
            normalization: DepthNormalization::ZScore,
            ..unsmoothed(1.0, SegmentCap::Disabled)
        };
        let scorer = BoundaryScorer::new(params);
        let boundaries = scorer.select_boundaries(&[0.0, 0.0, 0.0, 0.0, 2.0, 0.0], 7);
        assert_eq!(boundaries, vec![5]);
    }

    #[test]
    fn test_trace_exposes_intermediates() {
        let scorer = BoundaryScorer::default();
        let texts = [
            "budget costs euros",
            "budget euros price",
            "costs price budget",
            "colour yellow design",
            "design yellow buttons",
            "buttons colour shape",
        ];
        let meeting = Meeting::from_texts("m", texts);
        let trace = scorer
            .trace(&meeting, &LexicalSimilarity::new(), &RecordingObserver::new())
            .unwrap();
        assert_eq!(trace.similarities.len(), 5);
        assert_eq!(trace.smoothed.len(), 5);
        assert_eq!(trace.depths.len(), 5);
        assert_eq!(trace.boundaries, vec![3]);
    }
}
