//! Semantic search demo
//!
//! - embedder.rs: shape normalization between the embedding call and the collection
//! - demo.rs: sample snippets, seeding, and the single-query search

pub mod demo;
pub mod embedder;

pub use demo::{
    ensure_persistent_collection, prompt_and_search, render_hit, search_top, seed_collection,
    snippet_id, SearchOutcome, SemanticIndex, SAMPLE_DOCS,
};
pub use embedder::{normalize_document, normalize_query, SearchEmbedder};
