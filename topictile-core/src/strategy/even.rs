//! EVEN baseline: equally spaced cuts

use super::traits::SegmentationStrategy;
use crate::config::EvenSpacing;
use crate::error::Result;
use crate::observer::EvaluationObserver;
use crate::types::Meeting;

/// Places boundaries at equally spaced positions, ignoring the text
#[derive(Debug, Clone, Copy, Default)]
pub struct EvenStrategy {
    spacing: EvenSpacing,
}

impl EvenStrategy {
    /// Create the baseline with a spacing rule
    pub fn new(spacing: EvenSpacing) -> Self {
        Self { spacing }
    }

    /// Boundaries for a meeting of `group_count` groups
    ///
    /// Only interior positions `0 < b < group_count - 1` are kept.
    pub fn boundaries(&self, group_count: usize) -> Vec<usize> {
        if group_count < 3 {
            return Vec::new();
        }

        let candidates: Vec<usize> = match self.spacing {
            EvenSpacing::SegmentCount(segments) => {
                let segments = segments.max(1);
                (1..segments)
                    .map(|i| ((i * group_count) as f64 / segments as f64).round() as usize)
                    .collect()
            }
            EvenSpacing::Interval(interval) => {
                let interval = interval.max(1);
                (1..).map(|i| i * interval).take_while(|&b| b < group_count).collect()
            }
        };

        let mut boundaries: Vec<usize> = candidates
            .into_iter()
            .filter(|&b| b > 0 && b < group_count - 1)
            .collect();
        boundaries.dedup();
        boundaries
    }
}

impl SegmentationStrategy for EvenStrategy {
    fn segment(&self, meeting: &Meeting, _observer: &dyn EvaluationObserver) -> Result<Vec<usize>> {
        Ok(self.boundaries(meeting.group_count()))
    }

    fn name(&self) -> &'static str {
        "even"
    }
}
