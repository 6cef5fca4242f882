//! carreview-rag - entity-filtered dense retrieval over car reviews
//!
//! Retrieval core for a Hebrew car-review question-answering assistant.
//! Scraped review articles are split into paragraph-aware chunks, embedded
//! into an exact flat L2 index, and searched with a router that confines a
//! query to the chunks about the vehicle models it names.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Data model, errors and the `Embedder` port
//! - **Service Layer** (`services`): Chunking, routing, search, ingestion
//! - **Infrastructure Layer** (`infrastructure`): Index, persistence, config, logging
//! - **Adapters** (`adapters`): HTTP embedding backend
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use carreview_rag::{ArtifactPaths, HashingEmbedder, RetrievalService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let embedder = Arc::new(HashingEmbedder::new(384)?);
//!     let service = RetrievalService::open(&ArtifactPaths::in_dir("data/index"), embedder)?;
//!     let result = service.retrieve("מה דעתכם על Corolla?", 5).await?;
//!     println!("{}", result.context_block());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::embeddings::{build_embedder, HttpEmbedder};
pub use domain::models::{
    CandidateSet, Chunk, ChunkingConfig, Config, Document, QueryResult, ScoredChunk, Source,
};
pub use domain::ports::Embedder;
pub use domain::{ArtifactKind, DomainResult, RetrievalError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::vector::{ArtifactPaths, FlatL2Index, HashingEmbedder, IndexSnapshot};
pub use services::{Chunker, IndexBuilder, IngestionPipeline, RetrievalService, Searcher};
