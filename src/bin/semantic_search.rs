//! Firmware log semantic search
//!
//! Seeds the sample collection and answers a single query with its closest
//! snippet.

use clap::Parser;
use codex_memory::config::{config_path, load_config_layered, validate_config, Config};
use codex_memory::memory::EmbeddingService;
use codex_memory::search::{ensure_persistent_collection, prompt_and_search, seed_collection};
use codex_memory::{logging, Result, VERSION};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "semantic-search",
    version = VERSION,
    about = "Search sample firmware logs by meaning",
    long_about = None
)]
struct Args {
    /// Directory holding the collection database
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Collection name
    #[arg(long)]
    collection: Option<String>,

    /// Config file path
    #[arg(short, long, env = "CODEX_MEMORY_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.db_path {
            config.search.db_path = path.clone();
        }
        if let Some(collection) = &self.collection {
            config.search.collection = collection.clone();
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
    let index =
        ensure_persistent_collection(&config.search.db_path, &config.search.collection, embeddings)
            .await?;
    seed_collection(&index).await?;

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    let outcome = prompt_and_search(
        &index,
        BufReader::new(tokio::io::stdin()),
        &mut tokio::io::stdout(),
        &mut tokio::io::stderr(),
        interrupt,
    )
    .await?;

    debug!("Search finished: {:?}", outcome);
    Ok(())
}
