//! Cached embedding generation
//!
//! Wraps an `EmbeddingProvider` with the bounded LRU cache. A process-wide
//! instance is available through `EmbeddingService::shared`, built at most
//! once no matter how many callers race to reach it.

use crate::agent::OllamaClient;
use crate::config::Config;
use crate::core::{EmbeddingProvider, EmbeddingShape};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::cache::EmbeddingCache;

/// Process-wide embedding service
static SHARED: OnceCell<EmbeddingService> = OnceCell::const_new();

/// Embedding service with an exact-text cache in front of the provider
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    cache: EmbeddingCache,
}

impl EmbeddingService {
    /// Create a new embedding service with its own cache
    pub fn new(provider: Arc<dyn EmbeddingProvider>, cache_capacity: u64) -> Self {
        EmbeddingService {
            provider,
            cache: EmbeddingCache::new(cache_capacity),
        }
    }

    /// Get the process-wide service, initializing it on first use.
    ///
    /// Only the first successful call's configuration is used; later calls
    /// share the same instance and cache for the rest of the process.
    pub async fn shared(config: &Config) -> Result<&'static EmbeddingService> {
        SHARED
            .get_or_try_init(|| async {
                let client = OllamaClient::new(config.ollama.clone())?;
                info!(
                    "Initialized embedding service: model={}, cache_capacity={}",
                    client.embedding_model(),
                    config.memory.cache_capacity
                );
                Ok(EmbeddingService::new(
                    Arc::new(client),
                    config.memory.cache_capacity,
                ))
            })
            .await
    }

    /// Identifier of the underlying embedding model
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Get the raw embedding payload for a text, using the cache
    pub async fn embed_shape(&self, text: &str) -> Result<EmbeddingShape> {
        if let Some(cached) = self.cache.get(text).await {
            debug!("Embedding cache hit: chars={}", text.len());
            return Ok(cached);
        }

        let shape = self.provider.embed(text).await?;
        self.cache.put(text, shape.clone()).await;
        Ok(shape)
    }

    /// Generate an embedding for a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_shape(text).await?.into_vector()
    }

    /// Generate embeddings for multiple texts, each embedded independently
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Get a reference to the cache
    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}
