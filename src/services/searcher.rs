//! Nearest-neighbour search over a loaded index snapshot

use std::sync::Arc;

use crate::domain::errors::{DomainResult, RetrievalError};
use crate::domain::models::{CandidateSet, QueryResult, ScoredChunk};
use crate::infrastructure::vector::{IndexSnapshot, Neighbor};

/// Ranks chunks of an immutable snapshot against query vectors
///
/// Cheap to clone; the snapshot is shared.
#[derive(Debug, Clone)]
pub struct Searcher {
    snapshot: Arc<IndexSnapshot>,
}

impl Searcher {
    /// Search over a loaded snapshot
    pub const fn new(snapshot: Arc<IndexSnapshot>) -> Self {
        Self { snapshot }
    }

    /// The index and metadata being searched
    pub fn snapshot(&self) -> &IndexSnapshot {
        &self.snapshot
    }

    /// Up to `top_k` chunks nearest to `query_vector` among `candidates`
    ///
    /// Results are ascending by squared L2 distance, ties broken by row.
    /// Fewer than `top_k` hits are returned when fewer candidates exist.
    pub fn search(
        &self,
        query_vector: &[f32],
        candidates: &CandidateSet,
        top_k: usize,
    ) -> DomainResult<QueryResult> {
        if top_k == 0 {
            return Err(RetrievalError::InvalidTopK(top_k));
        }

        let index = self.snapshot.index();
        let neighbors = match candidates {
            CandidateSet::All => index.search(query_vector, top_k)?,
            CandidateSet::Restricted(rows) => {
                index.search_rows(query_vector, rows.iter().copied(), top_k)?
            }
        };

        let hits: Vec<ScoredChunk> = neighbors
            .into_iter()
            .filter_map(|Neighbor { row, distance }| {
                let row = row?;
                self.snapshot.metadata().get(row).map(|chunk| ScoredChunk {
                    row,
                    chunk: chunk.clone(),
                    distance,
                })
            })
            .collect();

        tracing::debug!(
            top_k,
            candidates = candidates.len(self.snapshot.len()),
            hits = hits.len(),
            "search complete"
        );

        Ok(QueryResult::new(hits))
    }
}
