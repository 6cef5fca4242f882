//! CLI command implementations.

pub mod corpus;
pub mod entities;
pub mod index;
pub mod ingest;
pub mod query;

use anyhow::{Context, Result};

use crate::adapters::embeddings::build_embedder;
use crate::domain::models::Config;
use crate::infrastructure::vector::ArtifactPaths;
use crate::services::{Chunker, IngestionPipeline, RetrievalService};

/// Ingestion pipeline wired from configuration
fn pipeline(config: &Config) -> Result<IngestionPipeline> {
    let chunker = Chunker::with_config(config.chunking.clone())?;
    let embedder = build_embedder(&config.embedding).context("Failed to set up embedder")?;
    Ok(IngestionPipeline::new(chunker, embedder, config.paths.clone()))
}

/// Retrieval service over the configured artifacts
fn open_service(config: &Config) -> Result<RetrievalService> {
    let embedder = build_embedder(&config.embedding).context("Failed to set up embedder")?;
    RetrievalService::open(&ArtifactPaths::from(&config.paths), embedder)
        .context("Failed to open the index")
}
