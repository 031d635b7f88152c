//! Topic segmentation of meeting transcripts with windowed evaluation
//!
//! This crate segments meetings, given as ordered utterance groups, into
//! topically coherent blocks and scores the result against hierarchical
//! human annotations with the Pk and WindowDiff metrics.
//!
//! # Architecture
//!
//! - **Similarity**: pluggable [`SimilarityProvider`]s (lexical overlap,
//!   per-group embeddings, whole-window embeddings) over an injected
//!   [`Embedder`]
//! - **Tiling**: smoothing, valley depth and boundary selection in
//!   [`BoundaryScorer`]
//! - **Strategies**: [`EvenStrategy`] and [`TextTilingStrategy`] behind
//!   [`SegmentationStrategy`], selected through [`Algorithm`]
//! - **Evaluation**: [`AnnotationFlattener`]s build reference vectors,
//!   [`MetricEngine`] scores them, [`Evaluator`] ties everything together
//!
//! Recoverable conditions (unannotated meetings, very short meetings,
//! annotation quirks) are reported to an [`EvaluationObserver`].
//!
//! # Example
//!
//! ```rust
//! use topictile_core::{
//!     AnnotationSegment, Algorithm, Corpus, Evaluator, Meeting, NullObserver,
//!     SegmentationConfig,
//! };
//!
//! let meeting = Meeting::from_texts("m1", (0..10).map(|i| format!("utterance {i}")));
//! let annotations = vec![
//!     AnnotationSegment::new(0, 5),
//!     AnnotationSegment::new(5, 8),
//!     AnnotationSegment::new(8, 10),
//! ];
//! let corpus = Corpus::from_parts([meeting], [("m1".to_string(), annotations)]);
//!
//! let evaluator = Evaluator::new(Algorithm::Even, &SegmentationConfig::default(), None).unwrap();
//! let evaluation = evaluator.evaluate(&corpus, &NullObserver).unwrap();
//!
//! assert_eq!(evaluation.report.len(), 4);
//! assert!(evaluation.report.get("average_Pk_flattened").is_some());
//! ```

pub mod annotation;
pub mod config;
pub mod dataset;
pub mod embedding;
pub mod error;
pub mod evaluation;
pub mod metrics;
pub mod observer;
pub mod similarity;
pub mod strategy;
pub mod tiling;
pub mod types;

pub use annotation::{
    flatten_corpus, AllLevelsFlattener, AnnotationFlattener, Granularity, TopLevelFlattener,
};
pub use config::{
    DepthNormalization, EvenSpacing, SegmentCap, SegmentationConfig, SegmentationConfigBuilder,
    TilingParams,
};
pub use dataset::{AnnotationRow, Corpus, DatasetSelector, DatasetSource, UtteranceRow};
pub use embedding::{cosine_similarity, CachedEmbedder, Embedder, HashingEmbedder};
#[cfg(feature = "fastembed")]
pub use embedding::FastEmbedder;
pub use error::{EmbeddingError, Result, TilingError};
pub use evaluation::{render_transcript, run, Evaluation, Evaluator, TOPIC_CHANGE_MARKER};
pub use metrics::{
    default_window, pk, window_diff, GranularityReport, MeetingScore, MetricEngine, MetricReport,
};
pub use observer::{EvaluationObserver, Event, LogObserver, NullObserver, RecordingObserver};
pub use similarity::{
    GroupEmbeddingSimilarity, LexicalSimilarity, SentenceEmbeddingSimilarity, SimilarityProvider,
};
pub use strategy::{build_strategy, Algorithm, EvenStrategy, SegmentationStrategy, TextTilingStrategy};
pub use tiling::{BoundaryScorer, TilingTrace};
pub use types::{AnnotationSegment, BoundarySet, Meeting, UtteranceGroup};
