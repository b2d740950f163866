//! In-process fake providers for tests

use crate::core::{EmbeddingProvider, EmbeddingShape, GenerationProvider};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const DIMENSIONS: usize = 256;

/// Bag-of-words embedder: each lowercase word is hashed into a bucket and
/// the result is scaled to unit length. Texts sharing words land close
/// together.
pub struct HashingEmbedder {
    calls: AtomicUsize,
    failing: Option<String>,
    shape: fn(Vec<f32>) -> EmbeddingShape,
}

impl HashingEmbedder {
    pub fn new() -> Self {
        HashingEmbedder {
            calls: AtomicUsize::new(0),
            failing: None,
            shape: EmbeddingShape::Vector,
        }
    }

    /// Fail with an Ollama error whenever this exact text is embedded
    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing = Some(text.to_string());
        self
    }

    /// Answer with batches of one instead of bare vectors
    pub fn batched(mut self) -> Self {
        self.shape = |v| EmbeddingShape::Batch(vec![v]);
        self
    }

    /// Number of provider invocations so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() as usize) % DIMENSIONS] += 1.0;
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    fn model(&self) -> &str {
        "hashing-test"
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingShape> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.as_deref() == Some(text) {
            return Err(Error::Ollama("embedding backend unavailable".to_string()));
        }
        Ok((self.shape)(Self::vectorize(text)))
    }
}

/// Generator that replays scripted outcomes and records every prompt
pub struct ScriptedGenerator {
    outcomes: Mutex<VecDeque<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    /// Replies with `replies` in order, then echoes "ok"
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedGenerator {
            outcomes: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure for the next call
    pub fn then_fail(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// All `(prompt, model)` pairs seen so far
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().map(|(p, _)| p.clone())
    }
}

#[async_trait]
impl GenerationProvider for ScriptedGenerator {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), model.to_string()));
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply.trim().to_string()),
            Some(Err(message)) => Err(Error::Ollama(message)),
            None => Ok("ok".to_string()),
        }
    }
}
