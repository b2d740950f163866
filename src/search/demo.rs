//! Semantic search over a fixed firmware-log document set
//!
//! Seeds a persistent collection with sample snippets (upserted under stable
//! ids, so reruns overwrite instead of duplicating) and answers one free-text
//! query with its single nearest neighbour.

use crate::core::{QueryResult, SearchHit};
use crate::database::VectorCollection;
use crate::error::Result;
use crate::memory::EmbeddingService;
use crate::repl::{next_line, LineEvent};
use std::future::Future;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::info;

use super::embedder::SearchEmbedder;

/// Documents seeded into the demo collection
pub const SAMPLE_DOCS: [&str; 6] = [
    "CAN ID 0x18FEEE: battery management heartbeat OK",
    "Bootloader: firmware version 1.4.7, CRC verified",
    "MCU log: watchdog reset occurred after 32 seconds idle",
    "Diagnostic trouble code P0A1F: drive inverter overtemp warning",
    "LIN bus frame 0x22: HVAC actuator calibration complete",
    "Identity of user, Austin",
];

/// Prompt shown before reading the query
pub const QUERY_PROMPT: &str = "Ask something about the firmware logs: ";

/// Stable identifier of the i-th sample snippet
pub fn snippet_id(index: usize) -> String {
    format!("firmware-snippet-{}", index)
}

/// A vector collection paired with the embedder that fills and queries it
#[derive(Clone)]
pub struct SemanticIndex {
    collection: VectorCollection,
    embedder: SearchEmbedder,
}

impl SemanticIndex {
    /// Embedder used for documents and queries
    pub fn embedder(&self) -> &SearchEmbedder {
        &self.embedder
    }

    /// Number of documents in the collection
    pub async fn count(&self) -> Result<usize> {
        self.collection.count().await
    }

    /// Embed `documents` and upsert them under `ids`
    pub async fn upsert(&self, ids: &[String], documents: &[String]) -> Result<()> {
        let embeddings = self.embedder.embed_documents(documents).await?;
        self.collection.upsert(ids, documents, &embeddings).await
    }

    /// Nearest neighbours for each query text
    pub async fn query(&self, query_texts: &[String], n_results: usize) -> Result<QueryResult> {
        let mut query_embeddings = Vec::with_capacity(query_texts.len());
        for text in query_texts {
            query_embeddings.extend(self.embedder.embed_query(text).await?);
        }
        self.collection.query(&query_embeddings, n_results).await
    }
}

/// Open (creating if absent) the collection `name` under `db_path`
pub async fn ensure_persistent_collection(
    db_path: &Path,
    name: &str,
    embeddings: EmbeddingService,
) -> Result<SemanticIndex> {
    let collection = VectorCollection::open(db_path, name).await?;
    let embedder = SearchEmbedder::new(embeddings);
    info!(
        "Using embedder: {} (model={})",
        embedder.name(),
        embedder.model()
    );
    Ok(SemanticIndex {
        collection,
        embedder,
    })
}

/// Upsert the sample snippets under their stable ids
pub async fn seed_collection(index: &SemanticIndex) -> Result<()> {
    let documents: Vec<String> = SAMPLE_DOCS.iter().map(|d| d.to_string()).collect();
    let ids: Vec<String> = (0..documents.len()).map(snippet_id).collect();
    index.upsert(&ids, &documents).await?;
    info!("Seeded {} sample snippets", documents.len());
    Ok(())
}

/// Single best match for `query`
pub async fn search_top(index: &SemanticIndex, query: &str) -> Result<Option<SearchHit>> {
    let result = index.query(&[query.to_string()], 1).await?;
    Ok(result.top_hit())
}

/// Render a match the way the CLI prints it
pub fn render_hit(hit: &SearchHit) -> String {
    match hit.distance {
        Some(distance) => format!(
            "Most similar snippet (distance {:.4}):\n{}",
            distance, hit.document
        ),
        None => format!("Most similar snippet:\n{}", hit.document),
    }
}

/// What happened to the one query the demo accepts
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A nearest neighbour was found
    Found(SearchHit),
    /// The collection yielded nothing
    NoMatches,
    /// The query was blank
    EmptyQuery,
    /// Input ended or was interrupted before a query arrived
    NoQuery,
}

/// Prompt for one query on `input`, search, and report.
///
/// Results go to `out`; notices about missing input go to `err`.
pub async fn prompt_and_search<R, W, E, I>(
    index: &SemanticIndex,
    mut input: R,
    out: &mut W,
    err: &mut E,
    mut interrupt: I,
) -> Result<SearchOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
    I: Future + Unpin,
{
    out.write_all(QUERY_PROMPT.as_bytes()).await?;
    out.flush().await?;

    let query = match next_line(&mut input, &mut interrupt).await? {
        LineEvent::Line(line) => line.trim().to_string(),
        LineEvent::EndOfInput | LineEvent::Interrupted => {
            err.write_all(b"\nNo query provided, exiting.\n").await?;
            err.flush().await?;
            return Ok(SearchOutcome::NoQuery);
        }
    };

    if query.is_empty() {
        err.write_all(b"Empty query, nothing to search.\n").await?;
        err.flush().await?;
        return Ok(SearchOutcome::EmptyQuery);
    }

    let outcome = match search_top(index, &query).await? {
        Some(hit) => {
            out.write_all(format!("{}\n", render_hit(&hit)).as_bytes()).await?;
            SearchOutcome::Found(hit)
        }
        None => {
            out.write_all(b"No matches found.\n").await?;
            SearchOutcome::NoMatches
        }
    };
    out.flush().await?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HashingEmbedder;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    async fn open_index() -> (TempDir, SemanticIndex) {
        let dir = tempdir().unwrap();
        let embeddings = EmbeddingService::new(Arc::new(HashingEmbedder::new()), 64);
        let index = ensure_persistent_collection(
            &dir.path().join("db"),
            "firmware_docs_ollama_v2",
            embeddings,
        )
        .await
        .unwrap();
        (dir, index)
    }

    #[test]
    fn test_snippet_ids() {
        assert_eq!(snippet_id(0), "firmware-snippet-0");
        assert_eq!(snippet_id(5), "firmware-snippet-5");
    }

    #[tokio::test]
    async fn test_creates_db_path_lazily() {
        let (dir, _index) = open_index().await;
        assert!(dir.path().join("db").is_dir());
    }

    #[tokio::test]
    async fn test_reseeding_is_idempotent() {
        let (_dir, index) = open_index().await;
        seed_collection(&index).await.unwrap();
        seed_collection(&index).await.unwrap();
        assert_eq!(index.count().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_battery_heartbeat_query() {
        let (_dir, index) = open_index().await;
        seed_collection(&index).await.unwrap();

        let hit = search_top(&index, "battery heartbeat").await.unwrap().unwrap();
        assert_eq!(hit.document, SAMPLE_DOCS[0]);
        assert!(hit.distance.is_some());
    }

    #[tokio::test]
    async fn test_search_unseeded_collection() {
        let (_dir, index) = open_index().await;
        assert!(search_top(&index, "anything").await.unwrap().is_none());
    }

    #[test]
    fn test_render_hit() {
        let hit = SearchHit {
            document: "doc".to_string(),
            distance: Some(0.123456),
        };
        assert_eq!(render_hit(&hit), "Most similar snippet (distance 0.1235):\ndoc");

        let hit = SearchHit {
            document: "doc".to_string(),
            distance: None,
        };
        assert_eq!(render_hit(&hit), "Most similar snippet:\ndoc");
    }

    #[tokio::test]
    async fn test_prompt_and_search_found() {
        let (_dir, index) = open_index().await;
        seed_collection(&index).await.unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = prompt_and_search(
            &index,
            &b"watchdog reset\n"[..],
            &mut out,
            &mut err,
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(matches!(outcome, SearchOutcome::Found(_)));
        assert!(out.starts_with(QUERY_PROMPT));
        assert!(out.contains("Most similar snippet (distance "));
        assert!(out.contains(SAMPLE_DOCS[2]));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_and_search_empty_query() {
        let (_dir, index) = open_index().await;

        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = prompt_and_search(&index, &b"   \n"[..], &mut out, &mut err, std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::EmptyQuery);
        assert_eq!(String::from_utf8(err).unwrap(), "Empty query, nothing to search.\n");
    }

    #[tokio::test]
    async fn test_prompt_and_search_end_of_input() {
        let (_dir, index) = open_index().await;

        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = prompt_and_search(&index, &b""[..], &mut out, &mut err, std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::NoQuery);
        assert!(String::from_utf8(err).unwrap().contains("No query provided, exiting."));
    }

    #[tokio::test]
    async fn test_prompt_and_search_interrupted() {
        let (_dir, index) = open_index().await;

        let mut out = Vec::new();
        let mut err = Vec::new();
        // A reader that never yields a line, raced against an immediate interrupt
        let (_writer, reader) = tokio::io::duplex(64);
        let outcome = prompt_and_search(
            &index,
            tokio::io::BufReader::new(reader),
            &mut out,
            &mut err,
            std::future::ready(()),
        )
        .await
        .unwrap();

        assert_eq!(outcome, SearchOutcome::NoQuery);
    }

    #[tokio::test]
    async fn test_no_matches_message() {
        let (_dir, index) = open_index().await;

        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = prompt_and_search(&index, &b"battery\n"[..], &mut out, &mut err, std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::NoMatches);
        assert!(String::from_utf8(out).unwrap().ends_with("No matches found.\n"));
    }
}
