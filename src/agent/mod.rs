//! Agent module - LLM logic, prompt engineering, and the Ollama client
//!
//! This module handles all AI-related functionality including:
//! - Ollama API client for embeddings and generation
//! - Session history management
//! - Prompt templates
//! - The memory-augmented conversational agent

mod client;
mod conversation;
mod memory_agent;
pub mod prompts;
mod types;

pub use client::OllamaClient;
pub use conversation::SessionHistory;
pub use memory_agent::{MemoryAgent, DEFAULT_HISTORY_WINDOW};
pub use prompts::PromptTemplate;
pub use types::*;
