//! Persistent vector collections
//!
//! Each collection is a named set of `(id, document, embedding)` rows in the
//! SQLite store. Queries are exact nearest-neighbour scans using squared
//! Euclidean distance, smallest first.

use crate::core::QueryResult;
use crate::error::{Error, Result};
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::sqlite::init_pool;

/// A named, persistent vector collection
#[derive(Clone)]
pub struct VectorCollection {
    pool: SqlitePool,
    name: String,
}

impl VectorCollection {
    /// Open the store under `dir` (created if absent) and get or create `name`
    pub async fn open(dir: &Path, name: &str) -> Result<Self> {
        let pool = init_pool(dir).await?;
        Self::get_or_create(pool, name).await
    }

    /// Get or create a collection on an existing pool
    pub async fn get_or_create(pool: SqlitePool, name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("collection name must not be empty".into()));
        }

        let created = sqlx::query("INSERT OR IGNORE INTO collections (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(Utc::now())
            .execute(&pool)
            .await?
            .rows_affected();

        if created > 0 {
            info!("Created collection {}", name);
        }

        Ok(VectorCollection {
            pool,
            name: name.to_string(),
        })
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or replace documents by id
    pub async fn upsert(
        &self,
        ids: &[String],
        documents: &[String],
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if ids.len() != documents.len() || ids.len() != embeddings.len() {
            return Err(Error::InvalidInput(format!(
                "upsert length mismatch: {} ids, {} documents, {} embeddings",
                ids.len(),
                documents.len(),
                embeddings.len()
            )));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for ((id, document), embedding) in ids.iter().zip(documents).zip(embeddings) {
            sqlx::query(
                r#"
                INSERT INTO embeddings (collection, id, document, embedding, dimension, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (collection, id) DO UPDATE SET
                    document = excluded.document,
                    embedding = excluded.embedding,
                    dimension = excluded.dimension,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&self.name)
            .bind(id)
            .bind(document)
            .bind(encode_embedding(embedding))
            .bind(embedding.len() as i64)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!("Upserted {} documents into {}", ids.len(), self.name);
        Ok(())
    }

    /// Insert a document under a freshly generated id; returns the id
    pub async fn add(&self, document: &str, embedding: &[f32]) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO embeddings (collection, id, document, embedding, dimension, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.name)
        .bind(&id)
        .bind(document)
        .bind(encode_embedding(embedding))
        .bind(embedding.len() as i64)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Number of documents in the collection
    pub async fn count(&self) -> Result<usize> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM embeddings WHERE collection = ?")
                .bind(&self.name)
                .fetch_one(&self.pool)
                .await?;
        Ok(count as usize)
    }

    /// Nearest neighbours for each query vector, at most `n_results` each.
    ///
    /// An empty collection yields empty inner lists.
    pub async fn query(&self, query_embeddings: &[Vec<f32>], n_results: usize) -> Result<QueryResult> {
        if n_results == 0 {
            return Err(Error::InvalidInput("n_results must be at least 1".into()));
        }

        let rows: Vec<(String, String, Vec<u8>)> =
            sqlx::query_as("SELECT id, document, embedding FROM embeddings WHERE collection = ?")
                .bind(&self.name)
                .fetch_all(&self.pool)
                .await?;

        let mut stored = Vec::with_capacity(rows.len());
        for (id, document, blob) in rows {
            match decode_embedding(&blob) {
                Some(vector) => stored.push((id, document, vector)),
                None => warn!("Skipping row {} in {}: corrupt embedding blob", id, self.name),
            }
        }

        let mut result = QueryResult::default();
        for query in query_embeddings {
            let mut scored: Vec<(f32, &String, &String)> = Vec::with_capacity(stored.len());
            for (id, document, vector) in &stored {
                if vector.len() != query.len() {
                    warn!(
                        "Skipping row {} in {}: dimension {} does not match query dimension {}",
                        id,
                        self.name,
                        vector.len(),
                        query.len()
                    );
                    continue;
                }
                scored.push((squared_l2(query, vector), id, document));
            }
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));
            scored.truncate(n_results);

            result.ids.push(scored.iter().map(|(_, id, _)| (*id).clone()).collect());
            result
                .documents
                .push(scored.iter().map(|(_, _, doc)| (*doc).clone()).collect());
            result.distances.push(scored.iter().map(|(d, _, _)| *d).collect());
        }

        Ok(result)
    }
}

/// Squared Euclidean distance
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Serialize embedding vector to little-endian bytes for BLOB storage
fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for &value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Deserialize embedding vector from BLOB
fn decode_embedding(bytes: &[u8]) -> Option<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect(),
    )
}
