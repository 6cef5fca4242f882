//! Offline ingestion: raw articles -> chunk list -> index artifacts

use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::{DomainResult, RetrievalError};
use crate::domain::models::{ChunkingSummary, PathsConfig};
use crate::domain::ports::Embedder;
use crate::infrastructure::corpus::{load_chunks, load_raw_documents, save_chunks};
use crate::infrastructure::vector::ArtifactPaths;

use super::chunker::Chunker;
use super::index_builder::IndexBuilder;

/// Outcome of corpus building
#[derive(Debug, Clone, Serialize)]
pub struct CorpusReport {
    /// Raw articles read
    pub documents: usize,
    /// Chunk count and lengths
    pub summary: ChunkingSummary,
}

/// Outcome of index building
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    /// Vectors stored, one per chunk
    pub rows: usize,
    /// Vector dimension inferred from the embedder
    pub dimension: usize,
    /// Name of the embedder that produced the vectors
    pub embedder: String,
}

/// Outcome of a full ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    /// Corpus building outcome
    pub corpus: CorpusReport,
    /// Index building outcome
    pub index: IndexReport,
}

/// Drives corpus and index building over the configured paths
pub struct IngestionPipeline {
    chunker: Chunker,
    builder: IndexBuilder,
    paths: PathsConfig,
}

impl IngestionPipeline {
    /// Pipeline reading from and writing to `paths`
    pub fn new(chunker: Chunker, embedder: Arc<dyn Embedder>, paths: PathsConfig) -> Self {
        Self {
            chunker,
            builder: IndexBuilder::new(embedder),
            paths,
        }
    }

    /// Chunk every raw article and write the chunk list
    pub fn build_corpus(&self) -> DomainResult<CorpusReport> {
        let documents = load_raw_documents(&self.paths.raw_dir)?;
        let chunks = self.chunker.segment(&documents);

        save_chunks(&chunks, &self.paths.chunks_path)?;

        let summary = ChunkingSummary::from_chunks(&chunks);
        tracing::info!(
            documents = documents.len(),
            chunks = summary.total_chunks,
            avg_len = summary.average_chunk_len(),
            path = %self.paths.chunks_path.display(),
            "corpus built"
        );

        Ok(CorpusReport {
            documents: documents.len(),
            summary,
        })
    }

    /// Embed the chunk list and persist the index artifacts
    pub async fn build_index(&self) -> DomainResult<IndexReport> {
        let chunks = load_chunks(&self.paths.chunks_path)?;
        if chunks.is_empty() {
            return Err(RetrievalError::EmptyCorpus);
        }

        let snapshot = self.builder.build(chunks).await?;
        self.builder
            .persist(&snapshot, &ArtifactPaths::from(&self.paths))?;

        Ok(IndexReport {
            rows: snapshot.len(),
            dimension: snapshot.index().dimension(),
            embedder: snapshot.info().embedder.clone(),
        })
    }

    /// Corpus building followed by index building
    pub async fn run(&self) -> DomainResult<IngestionReport> {
        let corpus = self.build_corpus()?;
        let index = self.build_index().await?;
        Ok(IngestionReport { corpus, index })
    }
}
