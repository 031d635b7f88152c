//! Offline embedder based on hashed bag-of-words

use super::Embedder;
use crate::error::EmbeddingError;
use crate::similarity::tokenize;
use std::hash::{Hash, Hasher};

/// Default vector length
pub const DEFAULT_DIMENSIONS: usize = 256;

/// Deterministic embedder: each token is hashed into one of `dimensions`
/// buckets with a hashed sign, then the vector is L2-normalised.
///
/// Needs no model download, so it is the default backend and the one used
/// in tests. Identical texts always map to identical vectors.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    /// Create an embedder with the given vector length
    pub fn new(dimensions: usize) -> Result<Self, EmbeddingError> {
        if dimensions == 0 {
            return Err(EmbeddingError::InitFailed(
                "dimensions must be greater than 0".into(),
            ));
        }
        Ok(Self { dimensions })
    }

    fn bucket(&self, token: &str) -> (usize, f32) {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        token.hash(&mut hasher);
        let hash = hasher.finish();
        let index = (hash % self.dimensions as u64) as usize;
        let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in tokenize(text) {
            let (index, sign) = self.bucket(&token);
            vector[index] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
