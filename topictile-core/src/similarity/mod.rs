//! Similarity providers for adjacent utterance windows
//!
//! Every variant answers the same question: how similar are the utterances
//! just before a gap to the utterances just after it. The boundary scorer
//! only sees the resulting sequence, so it does not care which variant
//! produced it.

mod embedding;
mod lexical;

pub use embedding::{GroupEmbeddingSimilarity, SentenceEmbeddingSimilarity};
pub use lexical::LexicalSimilarity;
pub(crate) use lexical::tokenize;

use crate::error::Result;
use std::ops::Range;

/// Scores the semantic similarity of two windows of utterance text
pub trait SimilarityProvider: Send + Sync {
    /// Similarity of two windows
    fn similarity(&self, window_a: &[&str], window_b: &[&str]) -> Result<f64>;

    /// Similarity for every gap of a meeting
    ///
    /// Returns `texts.len() - 1` values; value `j` compares the up-to-`window`
    /// texts ending at `j` with the up-to-`window` texts starting at `j + 1`.
    fn sequence(&self, texts: &[&str], window: usize) -> Result<Vec<f64>> {
        gap_windows(texts.len(), window)
            .map(|(left, right)| self.similarity(&texts[left], &texts[right]))
            .collect()
    }

    /// Provider name for logs
    fn name(&self) -> &'static str;
}

/// Left and right window ranges for every gap of a sequence of `len` items
///
/// Windows are clamped at the edges, so the first and last gaps compare
/// shorter windows instead of failing.
pub fn gap_windows(len: usize, window: usize) -> impl Iterator<Item = (Range<usize>, Range<usize>)> {
    let window = window.max(1);
    (1..len).map(move |gap| {
        let left = gap.saturating_sub(window)..gap;
        let right = gap..(gap + window).min(len);
        (left, right)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_windows_clamp_at_edges() {
        let windows: Vec<_> = gap_windows(5, 2).collect();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0], (0..1, 1..3));
        assert_eq!(windows[1], (0..2, 2..4));
        assert_eq!(windows[3], (2..4, 4..5));
    }

    #[test]
    fn test_gap_windows_short_input() {
        assert_eq!(gap_windows(1, 3).count(), 0);
        assert_eq!(gap_windows(0, 3).count(), 0);
        let single: Vec<_> = gap_windows(2, 0).collect();
        assert_eq!(single, vec![(0..1, 1..2)]);
    }
}
