//! `carreview corpus`: raw articles to chunk list

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::CorpusReport;

/// Result of corpus building
#[derive(Debug, Serialize)]
pub struct CorpusOutput {
    /// Raw articles read
    pub documents: usize,
    /// Chunks written
    pub chunks: usize,
    /// Mean chunk length in characters
    pub average_chunk_len: f64,
    /// Where the chunk list was written
    pub chunks_path: PathBuf,
}

impl CorpusOutput {
    /// Flatten a corpus report for display
    pub fn new(report: &CorpusReport, chunks_path: PathBuf) -> Self {
        Self {
            documents: report.documents,
            chunks: report.summary.total_chunks,
            average_chunk_len: report.summary.average_chunk_len(),
            chunks_path,
        }
    }
}

impl CommandOutput for CorpusOutput {
    fn to_human(&self) -> String {
        format!(
            "Built {} chunks from {} documents (average {:.1} chars)\nChunk list: {}",
            self.chunks,
            self.documents,
            self.average_chunk_len,
            self.chunks_path.display()
        )
    }
}

/// Handle the corpus command
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let report = super::pipeline(config)?
        .build_corpus()
        .context("Failed to build corpus")?;

    output(
        &CorpusOutput::new(&report, config.paths.chunks_path.clone()),
        json,
    );
    Ok(())
}
