//! Prompt templates and engineering

use crate::error::Result;
use handlebars::Handlebars;
use serde::Serialize;

/// Instruction placed at the top of every memory-augmented prompt
pub const SYSTEM_INSTRUCTION: &str = "You are Codex, a helpful local assistant. \
Ground your answers in the provided memories when relevant. \
If the memories are not applicable, proceed normally.";

/// Stands in for the memory block when retrieval finds nothing
pub const NO_MEMORIES_PLACEHOLDER: &str = "No prior memories found.";

/// Stands in for the transcript block when the session is empty
pub const NO_HISTORY_PLACEHOLDER: &str = "None";

/// Section order and headers of the memory-augmented prompt
pub const MEMORY_PROMPT_TEMPLATE: &str = "{{system}}\n\n\
Relevant stored memories:\n{{memories}}\n\n\
Recent conversation:\n{{transcript}}\n\n\
User: {{input}}\n\
Assistant:";

/// Template name for the memory-augmented prompt
const MEMORY_PROMPT_NAME: &str = "memory_prompt";

/// A prompt template using Handlebars syntax.
///
/// HTML escaping is disabled: prompts are plain text.
pub struct PromptTemplate {
    /// Template name
    name: String,
    /// Handlebars registry
    registry: Handlebars<'static>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(name: impl Into<String>, template: &str) -> Result<Self> {
        let name = name.into();
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(&name, template)?;

        Ok(PromptTemplate { name, registry })
    }

    /// The memory-augmented agent prompt
    pub fn memory_prompt() -> Result<Self> {
        Self::new(MEMORY_PROMPT_NAME, MEMORY_PROMPT_TEMPLATE)
    }

    /// Render the template with given data
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        Ok(self.registry.render(&self.name, data)?)
    }
}

/// Values substituted into `MEMORY_PROMPT_TEMPLATE`
#[derive(Debug, Clone, Serialize)]
pub struct MemoryPromptContext<'a> {
    pub system: &'a str,
    pub memories: String,
    pub transcript: String,
    pub input: &'a str,
}

impl<'a> MemoryPromptContext<'a> {
    /// Build the context, substituting placeholders for empty blocks
    pub fn new(memories: &[String], transcript: Option<String>, input: &'a str) -> Self {
        MemoryPromptContext {
            system: SYSTEM_INSTRUCTION,
            memories: if memories.is_empty() {
                NO_MEMORIES_PLACEHOLDER.to_string()
            } else {
                memories.join("\n")
            },
            transcript: transcript.unwrap_or_else(|| NO_HISTORY_PLACEHOLDER.to_string()),
            input,
        }
    }
}

/// Render the text persisted as a memory for one exchange
pub fn render_memory_snippet(user_input: &str, reply: &str) -> String {
    format!(
        "Conversation snippet:\nUser: {}\nAssistant: {}",
        user_input, reply
    )
}
