//! Algorithm selection and strategy construction

use super::even::EvenStrategy;
use super::texttiling::TextTilingStrategy;
use super::traits::SegmentationStrategy;
use crate::config::SegmentationConfig;
use crate::embedding::Embedder;
use crate::error::{Result, TilingError};
use crate::similarity::{
    GroupEmbeddingSimilarity, LexicalSimilarity, SentenceEmbeddingSimilarity, SimilarityProvider,
};
use crate::tiling::BoundaryScorer;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Supported segmentation algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Equally spaced baseline
    Even,
    /// TextTiling over term overlap
    TextTilingLexical,
    /// TextTiling over per-group sentence embeddings
    TextTilingBert,
    /// TextTiling over whole-window embeddings
    TextTilingSbert,
}

impl Algorithm {
    /// Every supported algorithm
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Even,
        Algorithm::TextTilingLexical,
        Algorithm::TextTilingBert,
        Algorithm::TextTilingSbert,
    ];

    /// Canonical selector string
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Even => "even",
            Algorithm::TextTilingLexical => "texttiling-lexical",
            Algorithm::TextTilingBert => "texttiling-bert",
            Algorithm::TextTilingSbert => "texttiling-sbert",
        }
    }

    /// Whether the algorithm needs an embedding backend
    pub fn requires_embedder(&self) -> bool {
        matches!(self, Algorithm::TextTilingBert | Algorithm::TextTilingSbert)
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Even => "equally spaced boundaries, no similarity computation",
            Algorithm::TextTilingLexical => "TextTiling over term-frequency overlap",
            Algorithm::TextTilingBert => "TextTiling over mean-pooled per-group embeddings",
            Algorithm::TextTilingSbert => "TextTiling over embeddings of whole windows",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = TilingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "even" => Ok(Algorithm::Even),
            "texttiling-lexical" | "lexical" | "texttiling" => Ok(Algorithm::TextTilingLexical),
            "texttiling-bert" | "bert" => Ok(Algorithm::TextTilingBert),
            "texttiling-sbert" | "sbert" => Ok(Algorithm::TextTilingSbert),
            _ => Err(TilingError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Build the strategy for an algorithm
///
/// Validates the configuration first. Embedding-based algorithms fail with
/// [`TilingError::InvalidConfig`] when no embedder is supplied.
pub fn build_strategy(
    algorithm: Algorithm,
    config: &SegmentationConfig,
    embedder: Option<Arc<dyn Embedder>>,
) -> Result<Box<dyn SegmentationStrategy>> {
    config.validate()?;

    if algorithm == Algorithm::Even {
        return Ok(Box::new(EvenStrategy::new(config.even)));
    }

    let provider: Box<dyn SimilarityProvider> = match (algorithm, embedder) {
        (Algorithm::TextTilingLexical, _) => Box::new(LexicalSimilarity::new()),
        (Algorithm::TextTilingBert, Some(embedder)) => {
            Box::new(SentenceEmbeddingSimilarity::new(embedder))
        }
        (Algorithm::TextTilingSbert, Some(embedder)) => {
            Box::new(GroupEmbeddingSimilarity::new(embedder))
        }
        (other, _) => {
            return Err(TilingError::InvalidConfig(format!(
                "algorithm '{other}' requires an embedding backend"
            )))
        }
    };

    Ok(Box::new(TextTilingStrategy::new(
        algorithm.name(),
        BoundaryScorer::new(config.tiling.clone()),
        provider,
        algorithm.requires_embedder(),
    )))
}
