//! Configuration types module
//!
//! The top-level `Config` plus agent and logging settings. Provider and
//! storage settings live in their own submodules.

pub mod provider;
pub mod storage;

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Ollama runtime configuration
    #[serde(default)]
    pub ollama: provider::OllamaConfig,

    /// Agent configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Memory store configuration
    #[serde(default)]
    pub memory: storage::MemoryConfig,

    /// Semantic search demo configuration
    #[serde(default)]
    pub search: storage::SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Agent-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Generation model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Number of session turns rendered into each prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            model: default_model(),
            history_window: default_history_window(),
        }
    }
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_history_window() -> usize {
    6
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (EnvFilter syntax)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty, json)
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn,codex_memory=info".to_string()
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(crate::error::Error::Config(format!(
                "Invalid log format: {}. Valid options: pretty, json",
                s
            ))),
        }
    }
}
