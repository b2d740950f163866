//! Core types used across the application

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// An embedding payload as delivered by a backend.
///
/// Runtimes disagree on what an embedding call returns: a bare vector,
/// a batch holding one vector, or (for degenerate models) a single number.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingShape {
    /// A single number
    Scalar(f32),
    /// One vector
    Vector(Vec<f32>),
    /// A batch of vectors
    Batch(Vec<Vec<f32>>),
}

impl EmbeddingShape {
    /// Collapse the payload into exactly one vector.
    ///
    /// A scalar becomes a one-element vector; a batch must hold exactly one
    /// vector.
    pub fn into_vector(self) -> Result<Vec<f32>> {
        match self {
            EmbeddingShape::Scalar(value) => Ok(vec![value]),
            EmbeddingShape::Vector(vector) => Ok(vector),
            EmbeddingShape::Batch(mut batch) if batch.len() == 1 => Ok(batch.remove(0)),
            EmbeddingShape::Batch(batch) => Err(Error::EmbeddingShape(format!(
                "expected a batch of one vector, got {} vectors",
                batch.len()
            ))),
        }
    }

    /// Short description of the variant, for logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            EmbeddingShape::Scalar(_) => "scalar",
            EmbeddingShape::Vector(_) => "vector",
            EmbeddingShape::Batch(_) => "batch",
        }
    }
}

impl TryFrom<Value> for EmbeddingShape {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(|v| EmbeddingShape::Scalar(v as f32))
                .ok_or_else(|| Error::EmbeddingShape(format!("non-finite number {}", n))),
            Value::Array(items) if items.is_empty() => {
                Err(Error::EmbeddingShape("empty embedding".to_string()))
            }
            Value::Array(items) if items.iter().all(Value::is_number) => {
                Ok(EmbeddingShape::Vector(numbers(&items)?))
            }
            Value::Array(items) if items.iter().all(Value::is_array) => {
                let batch = items
                    .iter()
                    .map(|row| match row {
                        Value::Array(inner) if !inner.is_empty() && inner.iter().all(Value::is_number) => {
                            numbers(inner)
                        }
                        _ => Err(Error::EmbeddingShape(
                            "batch rows must be non-empty arrays of numbers".to_string(),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(EmbeddingShape::Batch(batch))
            }
            Value::Array(_) => Err(Error::EmbeddingShape(
                "array mixes numbers and non-numbers".to_string(),
            )),
            other => Err(Error::EmbeddingShape(format!("{} value", json_type(&other)))),
        }
    }
}

fn numbers(items: &[Value]) -> Result<Vec<f32>> {
    items
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| Error::EmbeddingShape(format!("not a number: {}", v)))
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result of a nearest-neighbour query, one inner list per query vector.
///
/// Inner lists are ordered by ascending distance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Document identifiers
    pub ids: Vec<Vec<String>>,
    /// Document bodies
    pub documents: Vec<Vec<String>>,
    /// Distances to the query vector
    pub distances: Vec<Vec<f32>>,
}

impl QueryResult {
    /// Best match for the first query, if any
    pub fn top_hit(&self) -> Option<SearchHit> {
        let document = self.documents.first()?.first()?.clone();
        let distance = self.distances.first().and_then(|d| d.first().copied());
        Some(SearchHit { document, distance })
    }

    /// Documents matched by the first query, most similar first
    pub fn first_documents(&self) -> Vec<String> {
        self.documents.first().cloned().unwrap_or_default()
    }
}

/// A single matched document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document body
    pub document: String,
    /// Distance to the query, when the store reports one
    pub distance: Option<f32>,
}
