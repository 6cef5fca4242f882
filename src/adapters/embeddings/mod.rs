//! Embedding adapters and the factory that picks one from configuration.

pub mod http;

use std::sync::Arc;

pub use http::HttpEmbedder;

use crate::domain::errors::DomainResult;
use crate::domain::models::{EmbeddingConfig, EmbeddingProviderKind};
use crate::domain::ports::Embedder;
use crate::infrastructure::vector::HashingEmbedder;

/// Construct the embedder named by `config.provider`
pub fn build_embedder(config: &EmbeddingConfig) -> DomainResult<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match config.provider {
        EmbeddingProviderKind::Http => Arc::new(HttpEmbedder::new(config)?),
        EmbeddingProviderKind::Hashing => Arc::new(
            HashingEmbedder::new(config.dimension)?.with_max_batch_size(config.max_batch_size.max(1)),
        ),
    };

    tracing::debug!(provider = %config.provider, embedder = embedder.name(), "embedder ready");
    Ok(embedder)
}
