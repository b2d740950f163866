//! Conversation memory store
//!
//! Persists rendered exchanges into a vector collection and retrieves the
//! ones closest to a query. Memories are never updated or deleted, and
//! identical texts accumulate as separate records.

use crate::config::MemoryConfig;
use crate::database::VectorCollection;
use crate::error::Result;
use tracing::debug;

use super::embedding::EmbeddingService;

/// Memory store backed by a persistent vector collection
#[derive(Clone)]
pub struct MemoryStore {
    collection: VectorCollection,
    embeddings: EmbeddingService,
    top_k: usize,
}

impl MemoryStore {
    /// Open the store described by `config`, creating its directory if absent
    pub async fn open(config: &MemoryConfig, embeddings: EmbeddingService) -> Result<Self> {
        let collection =
            VectorCollection::open(&config.persist_directory, &config.collection).await?;
        Ok(Self::new(collection, embeddings, config.top_k))
    }

    /// Create a store over an already opened collection
    pub fn new(collection: VectorCollection, embeddings: EmbeddingService, top_k: usize) -> Self {
        MemoryStore {
            collection,
            embeddings,
            top_k: top_k.max(1),
        }
    }

    /// Embed `text` and persist it under a new id
    pub async fn add_memory(&self, text: &str) -> Result<()> {
        let embedding = self.embeddings.embed(text).await?;
        let id = self.collection.add(text, &embedding).await?;
        debug!("Stored memory {} ({} chars)", id, text.len());
        Ok(())
    }

    /// Most relevant memories for `query`, using the configured `top_k`
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        self.search_k(query, self.top_k).await
    }

    /// Up to `k` memories ordered by increasing distance to `query`.
    ///
    /// An empty store yields an empty list.
    pub async fn search_k(&self, query: &str, k: usize) -> Result<Vec<String>> {
        let embedding = self.embeddings.embed(query).await?;
        let result = self.collection.query(&[embedding], k.max(1)).await?;
        let memories = result.first_documents();
        debug!("Retrieved {} memories", memories.len());
        Ok(memories)
    }

    /// Number of stored memories
    pub async fn len(&self) -> Result<usize> {
        self.collection.count().await
    }

    /// Whether no memories are stored
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
