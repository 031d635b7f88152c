//! TextTiling strategies: a similarity provider plus the boundary scorer

use super::traits::SegmentationStrategy;
use crate::error::Result;
use crate::observer::EvaluationObserver;
use crate::similarity::SimilarityProvider;
use crate::tiling::{BoundaryScorer, TilingTrace};
use crate::types::Meeting;

/// Delegates boundary selection to [`BoundaryScorer`]
pub struct TextTilingStrategy {
    name: &'static str,
    scorer: BoundaryScorer,
    provider: Box<dyn SimilarityProvider>,
    uses_embeddings: bool,
}

impl TextTilingStrategy {
    /// Compose a scorer with a similarity provider
    pub fn new(
        name: &'static str,
        scorer: BoundaryScorer,
        provider: Box<dyn SimilarityProvider>,
        uses_embeddings: bool,
    ) -> Self {
        Self {
            name,
            scorer,
            provider,
            uses_embeddings,
        }
    }

    /// Similarity provider in use
    pub fn provider(&self) -> &dyn SimilarityProvider {
        self.provider.as_ref()
    }

    /// Full scoring trace for a meeting
    pub fn trace(&self, meeting: &Meeting, observer: &dyn EvaluationObserver) -> Result<TilingTrace> {
        self.scorer.trace(meeting, self.provider.as_ref(), observer)
    }
}

impl SegmentationStrategy for TextTilingStrategy {
    fn segment(&self, meeting: &Meeting, observer: &dyn EvaluationObserver) -> Result<Vec<usize>> {
        self.scorer.score(meeting, self.provider.as_ref(), observer)
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn uses_embeddings(&self) -> bool {
        self.uses_embeddings
    }
}
