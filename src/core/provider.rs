//! Provider traits - Abstract interfaces for model backends
//!
//! The agent and the memory store only talk to models through these two
//! traits, so the Ollama client can be swapped for another runtime (or for
//! an in-process fake in tests).

use async_trait::async_trait;

use super::types::EmbeddingShape;
use crate::error::Result;

/// Converts text into an embedding payload
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Identifier of the embedding model
    fn model(&self) -> &str;

    /// Embed a single input.
    ///
    /// The payload is returned as delivered by the backend; callers
    /// normalize it with the `EmbeddingShape` accessors.
    async fn embed(&self, text: &str) -> Result<EmbeddingShape>;
}

/// Converts a fully composed prompt into a completion
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate a completion for `prompt` with `model`, trimmed of surrounding whitespace
    async fn generate(&self, prompt: &str, model: &str) -> Result<String>;
}
