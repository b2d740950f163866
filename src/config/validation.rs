//! Sanity checks on a loaded `Config`
//!
//! Every problem is collected so the user sees them all at once.

use super::types::Config;
use crate::error::{Error, Result};
use std::fmt;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `memory.top_k`
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All issues found in one config
#[derive(Debug, Clone, Default)]
pub struct ConfigValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ConfigValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }

    /// Fold the issues into one `Error::Config`
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let joined: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        Err(Error::Config(joined.join("; ")))
    }
}

/// Check every section of `config`
pub fn validate_config(config: &Config) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::default();

    match url::Url::parse(&config.ollama.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => result.reject(
            "ollama.base_url",
            format!("unsupported scheme {}", url.scheme()),
        ),
        Err(e) => result.reject(
            "ollama.base_url",
            format!("{} is not a URL ({})", config.ollama.base_url, e),
        ),
    }

    let required = [
        ("ollama.embedding_model", config.ollama.embedding_model.as_str()),
        ("agent.model", config.agent.model.as_str()),
        ("memory.collection", config.memory.collection.as_str()),
        ("search.collection", config.search.collection.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            result.reject(field, "must not be empty");
        }
    }

    let positive = [
        ("agent.history_window", config.agent.history_window as u64),
        ("memory.top_k", config.memory.top_k as u64),
        ("memory.cache_capacity", config.memory.cache_capacity),
    ];
    for (field, value) in positive {
        if value == 0 {
            result.reject(field, "must be at least 1");
        }
    }

    result
}
