//! Term-overlap similarity, no model required

use super::SimilarityProvider;
use crate::error::Result;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "in", "on", "at", "to",
    "for", "of", "with", "by", "from", "as", "and", "or", "but", "not", "no", "so", "if", "then",
    "it", "i", "you", "we", "that", "this", "uh", "um", "yeah", "okay", "mm", "hmm",
];

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}]+)?").expect("valid token regex"))
}

/// Lowercase word tokens without stop words or single characters
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    token_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

/// Cosine of the term-frequency vectors of two windows, in [0, 1]
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalSimilarity;

impl LexicalSimilarity {
    /// Create a lexical provider
    pub fn new() -> Self {
        Self
    }

    fn term_counts(window: &[&str]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for text in window {
            for token in tokenize(text) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl SimilarityProvider for LexicalSimilarity {
    fn similarity(&self, window_a: &[&str], window_b: &[&str]) -> Result<f64> {
        let a = Self::term_counts(window_a);
        let b = Self::term_counts(window_b);
        if a.is_empty() || b.is_empty() {
            return Ok(0.0);
        }

        let dot: f64 = a
            .iter()
            .filter_map(|(term, &ca)| b.get(term).map(|&cb| (ca * cb) as f64))
            .sum();
        let norm_a = a.values().map(|&c| (c * c) as f64).sum::<f64>().sqrt();
        let norm_b = b.values().map(|&c| (c * c) as f64).sum::<f64>().sqrt();

        Ok(dot / (norm_a * norm_b))
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_filters_noise() {
        let tokens = tokenize("Um, the Remote-Control is really BIG! I think so.");
        assert_eq!(tokens, vec!["remote", "control", "really", "big", "think"]);
    }

    #[test]
    fn test_identical_windows_score_one() {
        let provider = LexicalSimilarity::new();
        let score = provider
            .similarity(&["budget meeting costs"], &["budget meeting costs"])
            .unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_windows_score_zero() {
        let provider = LexicalSimilarity::new();
        let score = provider
            .similarity(&["budget costs"], &["banana colour"])
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_window_scores_zero() {
        let provider = LexicalSimilarity::new();
        assert_eq!(provider.similarity(&["um uh"], &["budget"]).unwrap(), 0.0);
        assert_eq!(provider.similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_sequence_length() {
        let provider = LexicalSimilarity::new();
        let texts = ["budget costs", "budget money", "colour design", "design colour"];
        let seq = provider.sequence(&texts, 1).unwrap();
        assert_eq!(seq.len(), 3);
        assert!(seq[1] < seq[0]);
        assert!(seq[1] < seq[2]);
    }
}
