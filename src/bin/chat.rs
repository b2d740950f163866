//! Codex Memory REPL
//!
//! Interactive chat with the memory-augmented agent.

use clap::Parser;
use codex_memory::agent::{MemoryAgent, OllamaClient};
use codex_memory::config::{config_path, load_config_layered, validate_config, Config};
use codex_memory::memory::{EmbeddingService, MemoryStore};
use codex_memory::{logging, repl, Result, VERSION};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "codex-memory",
    version = VERSION,
    about = "Local conversational agent with persistent vector memory",
    long_about = None
)]
struct Args {
    /// Generation model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Directory holding the persistent memory store
    #[arg(long)]
    memory_dir: Option<PathBuf>,

    /// Number of memories retrieved per turn
    #[arg(long)]
    top_k: Option<usize>,

    /// Config file path
    #[arg(short, long, env = "CODEX_MEMORY_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.agent.model = model.clone();
        }
        if let Some(dir) = &self.memory_dir {
            config.memory.persist_directory = dir.clone();
        }
        if let Some(top_k) = self.top_k {
            config.memory.top_k = top_k;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config_layered(&args.config.clone().unwrap_or_else(config_path))?;
    args.apply(&mut config);
    validate_config(&config).into_result()?;

    logging::init(&config.log)?;

    let embeddings = EmbeddingService::shared(&config).await?.clone();
    let memory = MemoryStore::open(&config.memory, embeddings).await?;
    let generator = Arc::new(OllamaClient::new(config.ollama.clone())?);

    let mut agent = MemoryAgent::new(generator, memory, config.agent.model.clone())?
        .with_history_window(config.agent.history_window);

    info!(
        "Memory store ready: dir={}, model={}",
        config.memory.persist_directory.display(),
        agent.model()
    );

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    let reason = repl::run(
        &mut agent,
        BufReader::new(tokio::io::stdin()),
        &mut tokio::io::stdout(),
        interrupt,
    )
    .await?;

    info!("Session finished: {:?}", reason);
    Ok(())
}
