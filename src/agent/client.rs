//! Ollama API client

use crate::config::OllamaConfig;
use crate::core::{EmbeddingProvider, EmbeddingShape, GenerationProvider};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ollama API client.
///
/// Serves both embeddings and generation from one runtime.
#[derive(Clone)]
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: OllamaConfig,
}

/// Body of `POST /api/embeddings`
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Body of `POST /api/generate`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response of `POST /api/generate` (non-streaming)
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    eval_count: Option<u64>,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();

        if let Some(ref api_key) = config.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                    .map_err(|e| Error::Config(format!("Invalid API key format: {}", e)))?,
            );
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(OllamaClient { client, config })
    }

    /// Base URL without a trailing slash
    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Get the embedding model
    pub fn embedding_model(&self) -> &str {
        &self.config.embedding_model
    }

    /// Request an embedding and return the raw payload
    pub async fn embeddings(&self, model: &str, text: &str) -> Result<EmbeddingShape> {
        let url = format!("{}/api/embeddings", self.base_url());

        debug!("Requesting embedding from Ollama: model={}, chars={}", model, text.len());

        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest { model, prompt: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Ollama(format!("API error ({}): {}", status, error_text)));
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            Error::MalformedEmbedding(format!("response for model {} is not JSON: {}", model, e))
        })?;
        // `/api/embeddings` answers `embedding`, `/api/embed` answers `embeddings`
        let payload = match body {
            serde_json::Value::Object(mut map) => {
                map.remove("embedding").or_else(|| map.remove("embeddings"))
            }
            _ => None,
        };
        let payload = payload.filter(|v| !v.is_null()).ok_or_else(|| {
            Error::MalformedEmbedding(format!(
                "response for model {} has no 'embedding' field",
                model
            ))
        })?;

        EmbeddingShape::try_from(payload)
    }

    /// Generate a completion with a specific model
    pub async fn generate_with_model(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url());

        debug!("Sending generate request to Ollama: model={}", model);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let body = response.json::<GenerateResponse>().await?;

            if let Some(tokens) = body.eval_count {
                debug!(
                    "Ollama response: model={}, tokens={}",
                    body.model.as_deref().unwrap_or(model),
                    tokens
                );
            }

            body.response
                .map(|text| text.trim().to_string())
                .ok_or_else(|| Error::Ollama("response is missing the 'response' field".to_string()))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(Error::Ollama(format!("API error ({}): {}", status, error_text)))
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    fn model(&self) -> &str {
        self.embedding_model()
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingShape> {
        self.embeddings(&self.config.embedding_model, text).await
    }
}

#[async_trait]
impl GenerationProvider for OllamaClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        self.generate_with_model(model, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> OllamaConfig {
        OllamaConfig {
            base_url,
            ..OllamaConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new(OllamaConfig::default());
        assert!(client.is_ok());

        let client = OllamaClient::new(OllamaConfig {
            timeout: Some(std::time::Duration::from_secs(30)),
            ..OllamaConfig::default()
        });
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_embed_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .and(body_partial_json(json!({"model": "all-minilm", "prompt": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"embedding": [0.1, 0.2, 0.3]})))
            .expect(1)
            .mount(&server)
            .await;

        let client = OllamaClient::new(test_config(server.uri())).unwrap();
        let shape = EmbeddingProvider::embed(&client, "hello").await.unwrap();
        assert_eq!(shape, EmbeddingShape::Vector(vec![0.1, 0.2, 0.3]));
    }

    #[tokio::test]
    async fn test_embed_batch_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"embeddings": [[1.0, 0.0]]})))
            .mount(&server)
            .await;

        let client = OllamaClient::new(test_config(server.uri())).unwrap();
        let shape = EmbeddingProvider::embed(&client, "hello").await.unwrap();
        assert_eq!(shape, EmbeddingShape::Batch(vec![vec![1.0, 0.0]]));
    }

    #[tokio::test]
    async fn test_embed_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
            .mount(&server)
            .await;

        let client = OllamaClient::new(test_config(server.uri())).unwrap();
        let err = EmbeddingProvider::embed(&client, "hello").await.unwrap_err();
        assert!(matches!(err, Error::MalformedEmbedding(_)));
    }

    #[tokio::test]
    async fn test_embed_missing_payload_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model": "all-minilm"})))
            .mount(&server)
            .await;

        let client = OllamaClient::new(test_config(server.uri())).unwrap();
        let err = EmbeddingProvider::embed(&client, "hello").await.unwrap_err();
        assert!(matches!(err, Error::MalformedEmbedding(_)));
    }

    #[tokio::test]
    async fn test_generate_trims_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({"model": "llama3", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3",
                "response": "  Hi there!\n",
                "done": true
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::new(test_config(server.uri())).unwrap();
        let text = client.generate("User: hello\nAssistant:", "llama3").await.unwrap();
        assert_eq!(text, "Hi there!");
    }

    #[tokio::test]
    async fn test_generate_unknown_model_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "model 'nope' not found"})),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(test_config(server.uri())).unwrap();
        let err = client.generate("hi", "nope").await.unwrap_err();
        assert!(matches!(err, Error::Ollama(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(header_eq("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = test_config(server.uri());
        config.api_key = Some(SecretString::from("secret-token"));
        let client = OllamaClient::new(config).unwrap();
        assert_eq!(client.generate("hi", "llama3").await.unwrap(), "ok");
    }
}
