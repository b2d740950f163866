//! Embedding adapter for the document collection
//!
//! Normalizes whatever the embedding call returns into the shapes the
//! collection expects: one vector per query (wrapped as a single-row batch)
//! and one vector per document.

use crate::core::EmbeddingShape;
use crate::error::{Error, Result};
use crate::memory::EmbeddingService;

/// Name reported for this adapter
pub const EMBEDDER_NAME: &str = "local_ollama_embedder";

/// Shape-normalizing embedder used by the semantic search demo
#[derive(Clone)]
pub struct SearchEmbedder {
    service: EmbeddingService,
}

impl SearchEmbedder {
    /// Wrap an embedding service
    pub fn new(service: EmbeddingService) -> Self {
        SearchEmbedder { service }
    }

    /// Adapter name
    pub fn name(&self) -> &'static str {
        EMBEDDER_NAME
    }

    /// Underlying embedding model
    pub fn model(&self) -> &str {
        self.service.model()
    }

    /// Embed a query as a batch holding exactly one vector
    pub async fn embed_query(&self, text: &str) -> Result<Vec<Vec<f32>>> {
        normalize_query(self.service.embed_shape(text).await?)
    }

    /// Embed each document independently, one vector per document
    pub async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(normalize_document(self.service.embed_shape(text).await?)?);
        }
        Ok(vectors)
    }
}

/// Query shape: scalar and vector payloads are wrapped; a batch must hold
/// exactly one vector.
pub fn normalize_query(shape: EmbeddingShape) -> Result<Vec<Vec<f32>>> {
    match shape {
        EmbeddingShape::Scalar(value) => Ok(vec![vec![value]]),
        EmbeddingShape::Vector(vector) => Ok(vec![vector]),
        EmbeddingShape::Batch(batch) if batch.len() == 1 => Ok(batch),
        EmbeddingShape::Batch(batch) => Err(Error::EmbeddingShape(format!(
            "query embedding is a batch of {} vectors",
            batch.len()
        ))),
    }
}

/// Document shape: exactly one vector per document
pub fn normalize_document(shape: EmbeddingShape) -> Result<Vec<f32>> {
    shape.into_vector()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HashingEmbedder;
    use std::sync::Arc;

    #[test]
    fn test_normalize_query_shapes() {
        assert_eq!(normalize_query(EmbeddingShape::Scalar(0.5)).unwrap(), vec![vec![0.5]]);
        assert_eq!(
            normalize_query(EmbeddingShape::Vector(vec![1.0, 2.0])).unwrap(),
            vec![vec![1.0, 2.0]]
        );
        assert_eq!(
            normalize_query(EmbeddingShape::Batch(vec![vec![1.0, 2.0]])).unwrap(),
            vec![vec![1.0, 2.0]]
        );
    }

    #[test]
    fn test_normalize_query_rejects_multi_batch() {
        let err = normalize_query(EmbeddingShape::Batch(vec![vec![1.0], vec![2.0]])).unwrap_err();
        assert!(matches!(err, Error::EmbeddingShape(_)));
    }

    #[tokio::test]
    async fn test_batched_provider_normalized() {
        let service = EmbeddingService::new(Arc::new(HashingEmbedder::new().batched()), 16);
        let embedder = SearchEmbedder::new(service);

        let query = embedder.embed_query("watchdog").await.unwrap();
        let docs = embedder.embed_documents(&["watchdog".to_string()]).await.unwrap();

        assert_eq!(query.len(), 1);
        assert_eq!(query, docs);
        assert_eq!(embedder.name(), "local_ollama_embedder");
    }
}
