//! Core module - Fundamental traits and types
//!
//! - Provider traits for embedding and generation backends
//! - Shared data types for embeddings and nearest-neighbour results

pub mod provider;
pub mod types;

pub use provider::{EmbeddingProvider, GenerationProvider};
pub use types::{EmbeddingShape, QueryResult, SearchHit};
