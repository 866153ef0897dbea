//! Embedding cache for the RAG pipeline.
//!
//! Re-embedding unchanged text is pure waste: a given text and model always
//! produce the same vector. [`EmbeddingCache`] memoizes text-to-vector
//! lookups, and [`CachedEmbedder`] wraps any
//! [`EmbeddingClient`](crate::llm::EmbeddingClient) with one transparently.
//!
//! Cache keys are SHA-256 hashes of `text + model_name`, so different
//! models never share entries. Eviction is least-recently-used with a
//! bounded entry count.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::llm::EmbeddingClient;
use crate::types::Result;

/// Cache performance counters.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entry_count: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct CacheEntry {
    embedding: Vec<f32>,
    last_accessed: Instant,
}

/// In-memory LRU cache for embedding vectors.
///
/// Thread-safe via `parking_lot::RwLock`; when the entry count exceeds
/// `max_entries` the least recently used entry is evicted.
pub struct EmbeddingCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl EmbeddingCache {
    /// Create a cache bounded to `max_entries` vectors.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Compute the cache key for a text/model pair.
    pub fn compute_key(text: &str, model: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(b"|");
        hasher.update(model.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Fetch an embedding, refreshing its recency on hit.
    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(entry) => {
                entry.last_accessed = Instant::now();
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.embedding.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store an embedding, evicting the least recently used entry if the
    /// cache is full.
    pub fn set(&self, key: &str, embedding: Vec<f32>) {
        let mut entries = self.entries.write();

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let lru_key = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(key, _)| key.clone());
            if let Some(lru_key) = lru_key {
                entries.remove(&lru_key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                embedding,
                last_accessed: Instant::now(),
            },
        );
    }

    /// Drop every cached vector.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of cached vectors.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.entries.read().len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// An [`EmbeddingClient`] decorator that memoizes through an
/// [`EmbeddingCache`].
///
/// Batch requests only forward the texts the cache has not seen; results
/// come back merged in input order.
pub struct CachedEmbedder {
    inner: Arc<dyn EmbeddingClient>,
    cache: EmbeddingCache,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn EmbeddingClient>, max_entries: usize) -> Self {
        Self {
            inner,
            cache: EmbeddingCache::new(max_entries),
        }
    }

    /// Cache counters, for diagnostics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[async_trait]
impl EmbeddingClient for CachedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let key = EmbeddingCache::compute_key(text, self.inner.model_name());
        if let Some(embedding) = self.cache.get(&key) {
            return Ok(embedding);
        }

        let embedding = self.inner.embed(text).await?;
        self.cache.set(&key, embedding.clone());
        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let model = self.inner.model_name().to_string();
        let keys: Vec<String> = texts
            .iter()
            .map(|t| EmbeddingCache::compute_key(t, &model))
            .collect();

        let mut merged: Vec<Option<Vec<f32>>> =
            keys.iter().map(|key| self.cache.get(key)).collect();

        let miss_indices: Vec<usize> = merged
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect();

        if !miss_indices.is_empty() {
            let miss_texts: Vec<String> =
                miss_indices.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.inner.embed_batch(&miss_texts).await?;

            for (&i, embedding) in miss_indices.iter().zip(fresh.into_iter()) {
                self.cache.set(&keys[i], embedding.clone());
                merged[i] = Some(embedding);
            }
        }

        Ok(merged.into_iter().flatten().collect())
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    impl CountingEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingClient for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![text.chars().count() as f32, 1.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .map(|t| vec![t.chars().count() as f32, 1.0])
                .collect())
        }

        fn model_name(&self) -> &str {
            "counting-model"
        }
    }

    #[test]
    fn test_key_depends_on_text_and_model() {
        let a = EmbeddingCache::compute_key("hello", "model-a");
        let b = EmbeddingCache::compute_key("hello", "model-a");
        let c = EmbeddingCache::compute_key("hello", "model-b");
        let d = EmbeddingCache::compute_key("other", "model-a");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_set_get_and_stats() {
        let cache = EmbeddingCache::new(16);
        assert!(cache.get("k").is_none());

        cache.set("k", vec![1.0, 2.0]);
        assert_eq!(cache.get("k"), Some(vec![1.0, 2.0]));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
        assert!((stats.hit_rate() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = EmbeddingCache::new(2);
        cache.set("a", vec![1.0]);
        cache.set("b", vec![2.0]);

        // Touch "a" so "b" becomes the eviction candidate.
        let _ = cache.get("a");
        cache.set("c", vec![3.0]);

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_clear() {
        let cache = EmbeddingCache::new(4);
        cache.set("a", vec![1.0]);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_cached_embedder_memoizes_single() {
        let inner = Arc::new(CountingEmbedder::new());
        let cached = CachedEmbedder::new(inner.clone(), 16);

        let first = cached.embed("hello").await.unwrap();
        let second = cached.embed("hello").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_embedder_batch_only_forwards_misses() {
        let inner = Arc::new(CountingEmbedder::new());
        let cached = CachedEmbedder::new(inner.clone(), 16);

        cached.embed("one").await.unwrap();

        let batch = cached
            .embed_batch(&["one".to_string(), "three".to_string(), "seven!".to_string()])
            .await
            .unwrap();

        // Order preserved, cached entry merged back in position 0.
        assert_eq!(batch[0], vec![3.0, 1.0]);
        assert_eq!(batch[1], vec![5.0, 1.0]);
        assert_eq!(batch[2], vec![6.0, 1.0]);
        // One call for the warmup embed, one for the two misses.
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cached_embedder_all_hits_skips_gateway() {
        let inner = Arc::new(CountingEmbedder::new());
        let cached = CachedEmbedder::new(inner.clone(), 16);

        let texts = vec!["a".to_string(), "bb".to_string()];
        cached.embed_batch(&texts).await.unwrap();
        cached.embed_batch(&texts).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
