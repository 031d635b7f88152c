//! Segmentation strategy interface

use crate::error::Result;
use crate::observer::EvaluationObserver;
use crate::types::Meeting;

/// Produces topic boundary indices for a meeting
pub trait SegmentationStrategy: Send + Sync {
    /// Boundary indices, sorted and de-duplicated, each in `1..group_count`
    fn segment(&self, meeting: &Meeting, observer: &dyn EvaluationObserver) -> Result<Vec<usize>>;

    /// Strategy name for logs and reports
    fn name(&self) -> &'static str;

    /// Whether this strategy calls an embedding backend
    fn uses_embeddings(&self) -> bool {
        false
    }
}
