//! Type definitions for the agent module

use serde::{Deserialize, Serialize};

/// Role of a session turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant (AI) response
    Assistant,
}

impl Role {
    /// Capitalized label used when rendering transcripts
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of the in-memory session history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTurn {
    /// Who spoke
    pub role: Role,
    /// What was said
    pub content: String,
}

impl SessionTurn {
    /// Create a new user turn
    pub fn user(content: impl Into<String>) -> Self {
        SessionTurn {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        SessionTurn {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Render as a `Role: content` transcript line
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}
