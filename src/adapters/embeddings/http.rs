//! HTTP embedding adapter.
//!
//! Talks to any OpenAI-compatible `/embeddings` endpoint: the hosted OpenAI
//! API or a self-hosted server (text-embeddings-inference, infinity, vLLM)
//! serving a multilingual sentence-embedding model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainResult, RetrievalError};
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::Embedder;
use crate::infrastructure::vector::embedding_service::normalize;

/// Embedder backed by an OpenAI-compatible HTTP API.
pub struct HttpEmbedder {
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_batch_size: usize,
    client: reqwest::Client,
}

impl HttpEmbedder {
    /// Build the embedder and its HTTP client from configuration.
    ///
    /// The API key falls back to `OPENAI_API_KEY`; without either, requests
    /// are sent unauthenticated (typical for self-hosted servers).
    pub fn new(config: &EmbeddingConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RetrievalError::Embedding(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .clone()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .filter(|key| !key.is_empty()),
            max_batch_size: config.max_batch_size.max(1),
            client,
        })
    }

    async fn call_embeddings_api(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.base_url);

        let request_body = EmbeddingsRequest {
            model: &self.model,
            input: texts,
        };

        let mut request = self.client.post(&url).json(&request_body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RetrievalError::Embedding(format!("Embedding API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(RetrievalError::Embedding(format!(
                "Embedding API returned {status}: {body}"
            )));
        }

        let result: EmbeddingsResponse = response.json().await.map_err(|e| {
            RetrievalError::Serialization(format!("Failed to parse embedding response: {e}"))
        })?;

        if result.data.len() != texts.len() {
            return Err(RetrievalError::Embedding(format!(
                "Embedding API returned {} vectors for {} inputs",
                result.data.len(),
                texts.len()
            )));
        }

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        Ok(data
            .into_iter()
            .map(|d| {
                let mut vector = d.embedding;
                normalize(&mut vector);
                vector
            })
            .collect())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        let mut all_vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.max_batch_size) {
            let vectors = self.call_embeddings_api(batch).await?;
            tracing::debug!(batch = batch.len(), model = %self.model, "embedded batch");
            all_vectors.extend(vectors);
        }

        Ok(all_vectors)
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}

// -- OpenAI-compatible request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config(base_url: String) -> EmbeddingConfig {
        EmbeddingConfig {
            base_url,
            api_key: Some("test-key".to_string()),
            max_batch_size: 2,
            ..EmbeddingConfig::default()
        }
    }

    #[tokio::test]
    async fn test_embed_batch_sorts_and_normalizes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "intfloat/multilingual-e5-large"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [
                    {"index": 1, "embedding": [0.0, 2.0]},
                    {"index": 0, "embedding": [3.0, 4.0]}
                ]}"#,
            )
            .create_async()
            .await;

        let embedder = HttpEmbedder::new(&config(server.url())).unwrap();
        let vectors = embedder
            .embed_batch(&["קורולה".to_string(), "מאזדה".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors.len(), 2);
        assert!((vectors[0][0] - 0.6).abs() < 1e-6);
        assert!((vectors[0][1] - 0.8).abs() < 1e-6);
        assert!((vectors[1][1] - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_embed_batch_splits_requests() {
        let mut server = mockito::Server::new_async().await;
        let two = server
            .mock("POST", "/embeddings")
            .match_body(Matcher::PartialJson(serde_json::json!({"input": ["a", "b"]})))
            .with_body(r#"{"data": [{"index": 0, "embedding": [1.0]}, {"index": 1, "embedding": [1.0]}]}"#)
            .create_async()
            .await;
        let one = server
            .mock("POST", "/embeddings")
            .match_body(Matcher::PartialJson(serde_json::json!({"input": ["c"]})))
            .with_body(r#"{"data": [{"index": 0, "embedding": [1.0]}]}"#)
            .create_async()
            .await;

        let embedder = HttpEmbedder::new(&config(server.url())).unwrap();
        let texts: Vec<String> = ["a", "b", "c"].iter().map(|s| (*s).to_string()).collect();
        let vectors = embedder.embed_batch(&texts).await.unwrap();

        two.assert_async().await;
        one.assert_async().await;
        assert_eq!(vectors.len(), 3);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/embeddings")
            .with_status(503)
            .with_body("model loading")
            .create_async()
            .await;

        let embedder = HttpEmbedder::new(&config(server.url())).unwrap();
        let err = embedder.embed("שלום").await.unwrap_err();

        match err {
            RetrievalError::Embedding(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("model loading"));
            }
            other => panic!("Expected Embedding error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_vector_count_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/embeddings")
            .with_body(r#"{"data": [{"index": 0, "embedding": [1.0]}]}"#)
            .create_async()
            .await;

        let embedder = HttpEmbedder::new(&config(server.url())).unwrap();
        let err = embedder
            .embed_batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, RetrievalError::Embedding(_)));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let embedder = HttpEmbedder::new(&config("http://localhost:8080/v1/".to_string())).unwrap();
        assert_eq!(embedder.base_url, "http://localhost:8080/v1");
        assert_eq!(embedder.max_batch_size(), 2);
    }
}
