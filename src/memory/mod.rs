//! Memory module - embedding generation, caching, and retrieval
//!
//! Orchestrates remote embeddings (Ollama), in-process caching (moka),
//! and the SQLite-backed vector collection holding conversation memories.

pub mod cache;
pub mod embedding;
pub mod store;

pub use cache::{EmbeddingCache, DEFAULT_CACHE_CAPACITY};
pub use embedding::EmbeddingService;
pub use store::MemoryStore;
