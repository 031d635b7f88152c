//! Embedding-backed similarity providers

use super::{gap_windows, SimilarityProvider};
use crate::embedding::{cosine_similarity, mean_vector, Embedder};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// One vector per utterance group; a window is the mean of its groups
pub struct SentenceEmbeddingSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl SentenceEmbeddingSimilarity {
    /// Create a provider over an embedding backend
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    fn window_vector(vectors: &[Vec<f32>]) -> Vec<f32> {
        let refs: Vec<&[f32]> = vectors.iter().map(Vec::as_slice).collect();
        mean_vector(&refs)
    }
}

impl SimilarityProvider for SentenceEmbeddingSimilarity {
    fn similarity(&self, window_a: &[&str], window_b: &[&str]) -> Result<f64> {
        let a: Vec<String> = window_a.iter().map(|t| t.to_string()).collect();
        let b: Vec<String> = window_b.iter().map(|t| t.to_string()).collect();
        let va = Self::window_vector(&self.embedder.embed_batch(&a)?);
        let vb = Self::window_vector(&self.embedder.embed_batch(&b)?);
        Ok(cosine_similarity(&va, &vb))
    }

    // Embeds every group once, in a single batch, then pools per window.
    fn sequence(&self, texts: &[&str], window: usize) -> Result<Vec<f64>> {
        let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let vectors = self.embedder.embed_batch(&owned)?;

        Ok(gap_windows(texts.len(), window)
            .map(|(left, right)| {
                let va = Self::window_vector(&vectors[left]);
                let vb = Self::window_vector(&vectors[right]);
                cosine_similarity(&va, &vb)
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "sentence-embedding"
    }
}

/// One vector per window, embedding the joined window text as a unit
pub struct GroupEmbeddingSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl GroupEmbeddingSimilarity {
    /// Create a provider over an embedding backend
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

impl SimilarityProvider for GroupEmbeddingSimilarity {
    fn similarity(&self, window_a: &[&str], window_b: &[&str]) -> Result<f64> {
        let batch = vec![window_a.join(" "), window_b.join(" ")];
        let vectors = self.embedder.embed_batch(&batch)?;
        Ok(cosine_similarity(&vectors[0], &vectors[1]))
    }

    // Collects the distinct window texts of the meeting and embeds them in
    // one batch.
    fn sequence(&self, texts: &[&str], window: usize) -> Result<Vec<f64>> {
        let pairs: Vec<(String, String)> = gap_windows(texts.len(), window)
            .map(|(left, right)| (texts[left].join(" "), texts[right].join(" ")))
            .collect();

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut unique: Vec<String> = Vec::new();
        for (a, b) in &pairs {
            for text in [a, b] {
                if !positions.contains_key(text.as_str()) {
                    positions.insert(text.as_str(), unique.len());
                    unique.push(text.clone());
                }
            }
        }

        let vectors = self.embedder.embed_batch(&unique)?;
        Ok(pairs
            .iter()
            .map(|(a, b)| {
                cosine_similarity(&vectors[positions[a.as_str()]], &vectors[positions[b.as_str()]])
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "group-embedding"
    }
}
