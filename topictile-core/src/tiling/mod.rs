//! TextTiling-style boundary scoring
//!
//! Pipeline per meeting: similarity sequence from a
//! [`SimilarityProvider`](crate::similarity::SimilarityProvider), moving
//! average smoothing, valley depth per gap, normalisation, thresholding and
//! an optional cap on the number of boundaries.

mod depth;
mod scorer;
mod smoothing;

pub use depth::{depth_scores, normalize};
pub use scorer::{BoundaryScorer, TilingTrace, MIN_GROUPS};
pub use smoothing::smooth;
