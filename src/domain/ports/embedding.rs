//! Embedder port for dense vector generation.
//!
//! Defines the trait for embedding backends that turn text into
//! fixed-length, L2-normalised vectors for similarity search.

use async_trait::async_trait;

use crate::domain::errors::{DomainResult, RetrievalError};

/// Trait for embedding backends.
///
/// `embed_batch` must be length-preserving and keep input order; how a
/// caller partitions a corpus into batches must not change the vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Backend name (e.g., "http", "hashing").
    fn name(&self) -> &'static str;

    /// Generate embeddings for multiple texts, one vector per text, in order.
    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>>;

    /// Maximum number of texts per single call.
    fn max_batch_size(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RetrievalError::Embedding("Empty embedding response".to_string()))
    }
}
