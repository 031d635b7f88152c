//! Sentence-embedding capability
//!
//! The embedding model is the only I/O-bound collaborator, so it sits behind
//! the [`Embedder`] trait. Similarity providers take any implementation,
//! which keeps the scorer testable with [`HashingEmbedder`].

mod cache;
mod hashing;
#[cfg(feature = "fastembed")]
mod sentence_transformer;

pub use cache::CachedEmbedder;
pub use hashing::HashingEmbedder;
#[cfg(feature = "fastembed")]
pub use sentence_transformer::FastEmbedder;

use crate::error::EmbeddingError;

/// Produces fixed-length vectors for text
pub trait Embedder: Send + Sync {
    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed many texts, preserving order
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Vector length
    fn dimensions(&self) -> usize;

    /// Backend name for logs
    fn name(&self) -> &str;
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Cosine similarity in [-1, 1]
///
/// Mismatched lengths, empty input or a zero vector yield 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Element-wise mean of equally sized vectors
pub fn mean_vector(vectors: &[&[f32]]) -> Vec<f32> {
    let Some(first) = vectors.first() else {
        return Vec::new();
    };
    let mut mean = vec![0.0f32; first.len()];
    for vector in vectors {
        for (acc, value) in mean.iter_mut().zip(vector.iter()) {
            *acc += value;
        }
    }
    let n = vectors.len() as f32;
    for value in &mut mean {
        *value /= n;
    }
    mean
}
