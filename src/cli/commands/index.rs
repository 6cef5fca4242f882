//! `carreview index`: chunk list to index artifacts

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::IndexReport;

/// Result of index building
#[derive(Debug, Serialize)]
pub struct IndexOutput {
    /// Vectors stored
    pub rows: usize,
    /// Vector dimension
    pub dimension: usize,
    /// Embedder name
    pub embedder: String,
    /// Index blob location
    pub index_path: PathBuf,
    /// Metadata location
    pub metadata_path: PathBuf,
}

impl IndexOutput {
    /// Combine an index report with the configured artifact paths
    pub fn new(report: IndexReport, config: &Config) -> Self {
        Self {
            rows: report.rows,
            dimension: report.dimension,
            embedder: report.embedder,
            index_path: config.paths.index_path.clone(),
            metadata_path: config.paths.metadata_path.clone(),
        }
    }
}

impl CommandOutput for IndexOutput {
    fn to_human(&self) -> String {
        format!(
            "Indexed {} chunks ({}-dim, {} embedder)\nIndex:    {}\nMetadata: {}",
            self.rows,
            self.dimension,
            self.embedder,
            self.index_path.display(),
            self.metadata_path.display()
        )
    }
}

/// Handle the index command
pub async fn execute(config: &Config, json: bool) -> Result<()> {
    let report = super::pipeline(config)?
        .build_index()
        .await
        .context("Failed to build index")?;

    output(&IndexOutput::new(report, config), json);
    Ok(())
}
