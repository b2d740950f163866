//! Storage configuration types
//!
//! Where the vector collections live on disk and how they are queried.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Memory store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Directory holding the persistent memory collection
    #[serde(default = "default_memory_dir")]
    pub persist_directory: PathBuf,
    /// Collection name for conversation memories
    #[serde(default = "default_memory_collection")]
    pub collection: String,
    /// Number of memories retrieved per turn
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Capacity of the process-wide embedding cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig {
            persist_directory: default_memory_dir(),
            collection: default_memory_collection(),
            top_k: default_top_k(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_memory_dir() -> PathBuf {
    PathBuf::from("./data/memory_store")
}

fn default_memory_collection() -> String {
    "agent_memory".to_string()
}

fn default_top_k() -> usize {
    3
}

fn default_cache_capacity() -> u64 {
    1024
}

/// Semantic search demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Directory holding the demo collection
    #[serde(default = "default_search_db")]
    pub db_path: PathBuf,
    /// Demo collection name
    #[serde(default = "default_search_collection")]
    pub collection: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            db_path: default_search_db(),
            collection: default_search_collection(),
        }
    }
}

fn default_search_db() -> PathBuf {
    PathBuf::from("./db")
}

fn default_search_collection() -> String {
    "firmware_docs_ollama_v2".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_default() {
        let config = MemoryConfig::default();
        assert_eq!(config.persist_directory, PathBuf::from("./data/memory_store"));
        assert_eq!(config.cache_capacity, 1024);
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.collection, "firmware_docs_ollama_v2");
    }
}
