//! In-process embedding cache
//!
//! Uses a moka async cache bounded by entry count with least-recently-used
//! eviction. Keys are the exact input text; no normalization is applied, so
//! `"hello"` and `"hello "` are distinct entries.

use crate::core::EmbeddingShape;
use moka::future::Cache;
use moka::policy::EvictionPolicy;

/// Default number of cached embeddings
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;

/// Bounded LRU cache of embedding payloads, keyed by input text
#[derive(Clone)]
pub struct EmbeddingCache {
    entries: Cache<String, EmbeddingShape>,
}

impl EmbeddingCache {
    /// Create a cache holding at most `capacity` embeddings
    pub fn new(capacity: u64) -> Self {
        EmbeddingCache {
            entries: Cache::builder()
                .max_capacity(capacity)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
        }
    }

    /// Get a cached embedding
    pub async fn get(&self, text: &str) -> Option<EmbeddingShape> {
        self.entries.get(text).await
    }

    /// Store an embedding in cache
    pub async fn put(&self, text: &str, embedding: EmbeddingShape) {
        self.entries.insert(text.to_string(), embedding).await;
    }

    /// Number of cached entries, after applying pending evictions
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
