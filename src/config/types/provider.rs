//! Provider configuration types
//!
//! Configuration for the Ollama model-serving runtime, which backs both
//! embeddings and generation.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// Bearer token for a remote Ollama behind an authenticating proxy
    #[serde(skip_serializing, default)]
    pub api_key: Option<SecretString>,
    /// Optional request timeout (e.g. "10m"); unset means calls may run
    /// as long as the model needs
    #[serde(with = "humantime_serde", default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            base_url: default_base_url(),
            embedding_model: default_embedding_model(),
            api_key: None,
            timeout: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}
