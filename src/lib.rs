//! # Codex Memory
//!
//! A local conversational agent with persistent vector memory, served by an
//! Ollama runtime.
//!
//! ## Features
//!
//! - **Memory-augmented replies:** each turn retrieves related past exchanges
//!   and stores the new one
//! - **Persistent vector collections:** SQLite-backed, nearest-neighbour search
//!   by squared Euclidean distance
//! - **Cached embeddings:** bounded LRU cache keyed by exact input text
//! - **Semantic search demo:** a seeded firmware-log collection answering one
//!   query at a time

pub mod agent;
pub mod config;
pub mod core;
pub mod database;
pub mod error;
pub mod logging;
pub mod memory;
pub mod repl;
pub mod search;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
