//! Domain models

pub mod chunking;
pub mod config;
pub mod document;
pub mod retrieval;

pub use chunking::{Chunk, ChunkingConfig, ChunkingSummary};
pub use config::{
    Config, EmbeddingConfig, EmbeddingProviderKind, LoggingConfig, PathsConfig, RetrievalConfig,
};
pub use document::{Document, RawArticle};
pub use retrieval::{CandidateSet, QueryResult, ScoredChunk, Source};
