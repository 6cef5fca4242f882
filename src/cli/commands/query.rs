//! `carreview query`: ranked chunks for a question

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{list_table, output, truncate, CommandOutput};
use crate::cli::types::QueryArgs;
use crate::domain::models::{Config, QueryResult, Source};

const PREVIEW_CHARS: usize = 60;

/// Ranked hits for one query
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    /// The query as given
    pub query: String,
    /// Requested hit count
    pub top_k: usize,
    /// Hits in rank order
    pub result: QueryResult,
    /// Citations for the hits
    pub sources: Vec<Source>,
    /// Grounding context block, with `--context`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl CommandOutput for QueryOutput {
    fn to_human(&self) -> String {
        if self.result.is_empty() {
            return "No chunks retrieved.".to_string();
        }

        let mut table = list_table(&["rank", "distance", "chunk", "model", "title", "text"]);
        for (rank, hit) in self.result.hits.iter().enumerate() {
            table.add_row(vec![
                (rank + 1).to_string(),
                format!("{:.4}", hit.distance),
                hit.chunk.chunk_id.clone(),
                hit.chunk.car_model.clone().unwrap_or_else(|| "-".to_string()),
                truncate(&hit.chunk.article_title, 40),
                hit.chunk.preview(PREVIEW_CHARS),
            ]);
        }

        let mut rendered = format!("{} of top {} chunks:\n{table}", self.result.len(), self.top_k);
        if let Some(context) = &self.context {
            rendered.push_str("\n\nContext:\n");
            rendered.push_str(context);
        }
        rendered
    }
}

/// Handle the query command
pub async fn execute(args: QueryArgs, config: &Config, json: bool) -> Result<()> {
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);
    let service = super::open_service(config)?;

    let result = service
        .retrieve(&args.text, top_k)
        .await
        .context("Failed to retrieve chunks")?;

    let out = QueryOutput {
        query: args.text,
        top_k,
        sources: result.sources(),
        context: args.context.then(|| result.context_block()),
        result,
    };
    output(&out, json);
    Ok(())
}
