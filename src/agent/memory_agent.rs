//! Memory-augmented conversational agent
//!
//! Each turn retrieves related memories, composes one prompt from them and
//! the recent transcript, asks the model, and stores the exchange back as a
//! new memory.

use crate::agent::conversation::SessionHistory;
use crate::agent::prompts::{render_memory_snippet, MemoryPromptContext, PromptTemplate};
use crate::core::GenerationProvider;
use crate::error::Result;
use crate::memory::MemoryStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Number of session turns rendered into each prompt
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Conversational agent with persistent vector memory
pub struct MemoryAgent {
    generator: Arc<dyn GenerationProvider>,
    memory: MemoryStore,
    model: String,
    history: SessionHistory,
    history_window: usize,
    template: PromptTemplate,
}

impl MemoryAgent {
    /// Create an agent using `model` for generation
    pub fn new(
        generator: Arc<dyn GenerationProvider>,
        memory: MemoryStore,
        model: impl Into<String>,
    ) -> Result<Self> {
        Ok(MemoryAgent {
            generator,
            memory,
            model: model.into(),
            history: SessionHistory::new(),
            history_window: DEFAULT_HISTORY_WINDOW,
            template: PromptTemplate::memory_prompt()?,
        })
    }

    /// Override how many recent turns are rendered into prompts
    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns.max(1);
        self
    }

    /// Generation model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The session transcript so far
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// The backing memory store
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Compose the prompt for `user_input` from memories and recent history
    pub async fn build_prompt(&self, user_input: &str) -> Result<String> {
        let memories = self.memory.search(user_input).await?;
        let transcript = self.history.render_recent(self.history_window);

        debug!(
            "Composing prompt: memories={}, history_turns={}",
            memories.len(),
            self.history.recent(self.history_window).len()
        );

        self.template
            .render(&MemoryPromptContext::new(&memories, transcript, user_input))
    }

    /// Answer `user_input` and persist the exchange.
    ///
    /// Generation and persistence failures propagate to the caller; a failed
    /// generation leaves history and memory untouched.
    pub async fn respond(&mut self, user_input: &str) -> Result<String> {
        let prompt = self.build_prompt(user_input).await?;

        let response = self.generator.generate(&prompt, &self.model).await?;

        self.history.record_exchange(user_input, response.as_str());
        self.memory
            .add_memory(&render_memory_snippet(user_input, &response))
            .await?;

        info!(
            "Completed turn: model={}, session_turns={}",
            self.model,
            self.history.len()
        );

        Ok(response)
    }
}
