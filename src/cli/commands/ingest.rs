//! `carreview ingest`: corpus then index

use anyhow::{Context, Result};
use serde::Serialize;

use super::corpus::CorpusOutput;
use super::index::IndexOutput;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

/// Result of a full ingestion run
#[derive(Debug, Serialize)]
pub struct IngestOutput {
    /// Corpus stage
    pub corpus: CorpusOutput,
    /// Index stage
    pub index: IndexOutput,
}

impl CommandOutput for IngestOutput {
    fn to_human(&self) -> String {
        format!("{}\n{}", self.corpus.to_human(), self.index.to_human())
    }
}

/// Handle the ingest command
pub async fn execute(config: &Config, json: bool) -> Result<()> {
    let report = super::pipeline(config)?
        .run()
        .await
        .context("Ingestion failed")?;

    output(
        &IngestOutput {
            corpus: CorpusOutput::new(&report.corpus, config.paths.chunks_path.clone()),
            index: IndexOutput::new(report.index, config),
        },
        json,
    );
    Ok(())
}
