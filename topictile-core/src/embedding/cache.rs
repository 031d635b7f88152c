//! Memoising, batching and retrying wrapper around an [`Embedder`]

use super::Embedder;
use crate::error::EmbeddingError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Caches vectors per text and sends misses to the backend in one batch
///
/// Group-embedding similarity asks for the same window text many times per
/// meeting; the cache makes each distinct text cost one backend call.
/// Failed backend calls are retried up to `attempts` times in total.
pub struct CachedEmbedder<E> {
    inner: E,
    cache: Mutex<HashMap<String, Vec<f32>>>,
    attempts: usize,
}

impl<E: Embedder> CachedEmbedder<E> {
    /// Wrap a backend with a single attempt per call
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            attempts: 1,
        }
    }

    /// Set the total number of attempts per backend call (minimum 1)
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Number of cached texts
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Drop every cached vector
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    fn call_with_retry(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut last_error = None;
        for attempt in 1..=self.attempts {
            match self.inner.embed_batch(texts) {
                Ok(vectors) => return self.checked(vectors, texts.len()),
                Err(e) => {
                    log::warn!(
                        "{} embedding attempt {attempt}/{} failed: {e}",
                        self.inner.name(),
                        self.attempts
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| EmbeddingError::EmbeddingFailed("no attempt made".into())))
    }

    fn checked(&self, vectors: Vec<Vec<f32>>, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if vectors.len() != expected {
            return Err(EmbeddingError::EmbeddingFailed(format!(
                "backend returned {} vectors for {expected} texts",
                vectors.len()
            )));
        }
        let dims = self.inner.dimensions();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dims) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dims,
                found: bad.len(),
            });
        }
        Ok(vectors)
    }

    fn lock_error<T>(e: std::sync::PoisonError<T>) -> EmbeddingError {
        EmbeddingError::EmbeddingFailed(format!("Failed to acquire cache lock: {e}"))
    }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::EmbeddingFailed("No embedding returned".into()))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut misses: Vec<String> = {
            let cache = self.cache.lock().map_err(Self::lock_error)?;
            texts
                .iter()
                .filter(|t| !cache.contains_key(*t))
                .cloned()
                .collect()
        };
        misses.sort();
        misses.dedup();

        if !misses.is_empty() {
            let vectors = self.call_with_retry(&misses)?;
            let mut cache = self.cache.lock().map_err(Self::lock_error)?;
            for (text, vector) in misses.into_iter().zip(vectors) {
                cache.insert(text, vector);
            }
        }

        let cache = self.cache.lock().map_err(Self::lock_error)?;
        texts
            .iter()
            .map(|t| {
                cache.get(t).cloned().ok_or_else(|| {
                    EmbeddingError::EmbeddingFailed(format!("missing cached embedding for '{t}'"))
                })
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        calls: AtomicUsize,
        texts: AtomicUsize,
        failures_left: AtomicUsize,
    }

    impl CountingEmbedder {
        fn new(failures: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                texts: AtomicUsize::new(0),
                failures_left: AtomicUsize::new(failures),
            }
        }
    }

    impl Embedder for CountingEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![text.len() as f32, 1.0])
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(EmbeddingError::EmbeddingFailed("transient".into()));
            }
            self.texts.fetch_add(texts.len(), Ordering::SeqCst);
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_cache_deduplicates_calls() {
        let cached = CachedEmbedder::new(CountingEmbedder::new(0));
        let texts = vec!["a".to_string(), "bb".to_string(), "a".to_string()];

        let first = cached.embed_batch(&texts).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], first[2]);
        assert_eq!(cached.cached_len(), 2);

        cached.embed_batch(&texts).unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.inner.texts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_retries_transient_failures() {
        let cached = CachedEmbedder::new(CountingEmbedder::new(2)).with_attempts(3);
        let v = cached.embed("abc").unwrap();
        assert_eq!(v, vec![3.0, 1.0]);
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_gives_up_after_attempts() {
        let cached = CachedEmbedder::new(CountingEmbedder::new(5)).with_attempts(2);
        assert!(cached.embed("abc").is_err());
        assert_eq!(cached.cached_len(), 0);
    }

    #[test]
    fn test_clear() {
        let cached = CachedEmbedder::new(HashingEmbedder::new(4).unwrap());
        cached.embed("hello").unwrap();
        assert_eq!(cached.cached_len(), 1);
        cached.clear();
        assert_eq!(cached.cached_len(), 0);
        assert_eq!(cached.dimensions(), 4);
        assert_eq!(cached.name(), "hashing");
    }
}
