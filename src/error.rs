//! Error types for Codex Memory

use thiserror::Error;

/// Result type alias using Codex Memory's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Codex Memory
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ollama API error (non-success status or unusable body)
    #[error("Ollama API error: {0}")]
    Ollama(String),

    /// The embedding service answered without an embedding payload
    #[error("Malformed embedding response: {0}")]
    MalformedEmbedding(String),

    /// The embedding payload had a shape that cannot be used as a vector
    #[error("Unexpected embedding format: {0}")]
    EmbeddingShape(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt template error
    #[error("Template error: {0}")]
    Template(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Error::Template(err.to_string())
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(err: handlebars::RenderError) -> Self {
        Error::Template(err.to_string())
    }
}
