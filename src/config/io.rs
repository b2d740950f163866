//! Reading the config file, plus environment overlays.
//!
//! Files are JSON5 (`.json`) or TOML (`.toml`); anything else is tried as
//! JSON5 first and TOML second.

use std::path::Path;

use super::types::Config;
use crate::error::{Error, Result};

/// On-disk config encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json5,
    Toml,
    Unknown,
}

impl ConfigFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json5,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Unknown,
        }
    }

    fn parse(self, content: &str) -> Result<Config> {
        let invalid = |kind: &str, e: &dyn std::fmt::Display| {
            Error::Config(format!("Invalid {} config: {}", kind, e))
        };
        match self {
            ConfigFormat::Json5 => json5::from_str(content).map_err(|e| invalid("JSON", &e)),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| invalid("TOML", &e)),
            ConfigFormat::Unknown => json5::from_str(content)
                .or_else(|_| toml::from_str(content))
                .map_err(|e| invalid("config", &e)),
        }
    }
}

/// Defaults, then the file at `path` when present, then environment variables.
pub fn load_config_layered(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        load_config_from_path(path)?
    } else {
        Config::default()
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse the file at `path` without consulting the environment
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    ConfigFormat::of(path).parse(&content)
}

/// Overlay `.env` and process environment variables onto `config`.
///
/// Only CLI flags take precedence over these.
pub fn apply_env_overrides(config: &mut Config) {
    use secrecy::SecretString;

    dotenvy::dotenv().ok();

    // Ollama overrides
    if let Ok(host) = std::env::var("OLLAMA_HOST") {
        config.ollama.base_url = normalize_host(&host);
    }
    if let Ok(key) = std::env::var("OLLAMA_API_KEY") {
        if !key.is_empty() {
            config.ollama.api_key = Some(SecretString::from(key));
        }
    }
    if let Ok(model) = std::env::var("CODEX_EMBEDDING_MODEL") {
        config.ollama.embedding_model = model;
    }

    // Agent overrides
    if let Ok(model) = std::env::var("CODEX_MODEL") {
        config.agent.model = model;
    }

    // Memory overrides
    if let Ok(dir) = std::env::var("CODEX_MEMORY_DIR") {
        config.memory.persist_directory = std::path::PathBuf::from(dir);
    }
    if let Ok(top_k) = std::env::var("CODEX_MEMORY_TOP_K") {
        if let Ok(v) = top_k.parse() {
            config.memory.top_k = v;
        }
    }

    // Search demo overrides
    if let Ok(path) = std::env::var("CODEX_SEARCH_DB") {
        config.search.db_path = std::path::PathBuf::from(path);
    }

    // Logging overrides
    if let Ok(level) = std::env::var("RUST_LOG") {
        config.log.level = level;
    }
    if let Ok(format) = std::env::var("LOG_FORMAT") {
        if let Ok(format) = format.parse() {
            config.log.format = format;
        }
    }
}

/// `OLLAMA_HOST` is often given without a scheme (e.g. `0.0.0.0:11434`)
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
