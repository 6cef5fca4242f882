//! Retrieval core services
//!
//! Chunking, entity extraction, routing and search are synchronous and pure;
//! index building, ingestion and retrieval are async because they call the
//! embedder.

pub mod chunker;
pub mod entity_extractor;
pub mod index_builder;
pub mod ingestion;
pub mod query_router;
pub mod rag_service;
pub mod searcher;

pub use chunker::{split_paragraph, Chunker};
pub use entity_extractor::{detect_model_name, extract_universe};
pub use index_builder::IndexBuilder;
pub use ingestion::{CorpusReport, IndexReport, IngestionPipeline, IngestionReport};
pub use query_router::{detect_hits, route};
pub use rag_service::{RetrievalService, RoutePlan};
pub use searcher::Searcher;
