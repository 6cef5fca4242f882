//! Retrieval domain models
//!
//! Candidate sets produced by the query router and the ranked results the
//! searcher hands back to callers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::chunking::Chunk;

/// Rows of the index a query is allowed to match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSet {
    /// No entity filter applies; every row is a candidate
    All,
    /// Search is confined to exactly these (non-empty) row indices
    Restricted(BTreeSet<usize>),
}

impl CandidateSet {
    /// Build a candidate set from matched rows; no rows means no restriction
    pub fn from_rows(rows: BTreeSet<usize>) -> Self {
        if rows.is_empty() {
            Self::All
        } else {
            Self::Restricted(rows)
        }
    }

    /// Returns true when no restriction applies
    pub const fn is_unrestricted(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Number of candidate rows given the total row count
    pub fn len(&self, total_rows: usize) -> usize {
        match self {
            Self::All => total_rows,
            Self::Restricted(rows) => rows.range(..total_rows).count(),
        }
    }
}

/// One ranked hit: the chunk and its squared L2 distance to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Row of the chunk in the index / metadata table
    pub row: usize,

    /// The chunk record
    pub chunk: Chunk,

    /// Distance to the query (lower is more similar)
    pub distance: f32,
}

/// Citation for a retrieved chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Title of the source article
    pub article_title: String,

    /// URL of the source article
    pub article_url: Option<String>,

    /// Chunk identifier
    pub chunk_id: String,

    /// Distance to the query
    pub distance: f32,
}

/// Ranked retrieval results, ascending by distance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Hits ordered by ascending distance
    pub hits: Vec<ScoredChunk>,
}

impl QueryResult {
    /// Wrap an already-ordered hit list
    pub fn new(hits: Vec<ScoredChunk>) -> Self {
        Self { hits }
    }

    /// Number of hits
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if nothing was retrieved
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Citation list for the retrieved chunks, in rank order
    pub fn sources(&self) -> Vec<Source> {
        self.hits
            .iter()
            .map(|hit| Source {
                article_title: hit.chunk.article_title.clone(),
                article_url: hit.chunk.article_url.clone(),
                chunk_id: hit.chunk.chunk_id.clone(),
                distance: hit.distance,
            })
            .collect()
    }

    /// Render the grounding context block handed to the answering model
    pub fn context_block(&self) -> String {
        if self.hits.is_empty() {
            return "No context retrieved.".to_string();
        }

        self.hits
            .iter()
            .map(|hit| {
                format!(
                    "- source: {} ({}) | chunk: {} | score: {:.4}\n{}",
                    hit.chunk.article_title,
                    hit.chunk.article_url.as_deref().unwrap_or_default(),
                    hit.chunk.chunk_id,
                    hit.distance,
                    hit.chunk.chunk_text
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
