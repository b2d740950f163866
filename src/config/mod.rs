//! Configuration module
//!
//! - types/mod.rs: Core configuration types (Config, AgentConfig, LogConfig)
//! - types/provider.rs: Ollama runtime configuration
//! - types/storage.rs: Memory store and search demo configuration
//! - io.rs: Configuration loading and saving
//! - validation.rs: Configuration validation
//! - paths.rs: Configuration file paths

mod io;
mod paths;
mod types;
mod validation;

pub use types::{AgentConfig, Config, LogConfig, LogFormat};
pub use types::provider::OllamaConfig;
pub use types::storage::{MemoryConfig, SearchConfig};

pub use io::{apply_env_overrides, load_config_from_path, load_config_layered};
pub use paths::{config_dir, config_path, ensure_dir};
pub use validation::{validate_config, ConfigValidationResult, ValidationIssue};
