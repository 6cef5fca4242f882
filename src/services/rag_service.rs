//! RAG (Retrieval-Augmented Generation) retrieval service
//!
//! The outward entry point of the retrieval core: embeds a question, routes
//! it by the vehicle models it mentions, and ranks the matching chunks.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CandidateSet, QueryResult};
use crate::domain::ports::Embedder;
use crate::infrastructure::vector::{load_snapshot, ArtifactPaths, IndexSnapshot};

use super::entity_extractor::extract_universe;
use super::query_router::{detect_hits, route};
use super::searcher::Searcher;

/// Routing decision for a query, for inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    /// Entities the query mentions
    pub hits: Vec<String>,
    /// Rows the search will consider
    pub candidates: CandidateSet,
}

/// Retrieval over one loaded index snapshot
///
/// The snapshot is immutable, so a service can be shared across concurrent
/// queries behind an `Arc`.
pub struct RetrievalService {
    searcher: Searcher,
    embedder: Arc<dyn Embedder>,
}

impl RetrievalService {
    /// Load the artifact pair at `paths`
    ///
    /// Fails with `MissingArtifact` before ingestion has run, and with
    /// `InconsistentIndexMetadata` when the files disagree.
    pub fn open(paths: &ArtifactPaths, embedder: Arc<dyn Embedder>) -> DomainResult<Self> {
        let snapshot = load_snapshot(paths)?;
        tracing::info!(
            rows = snapshot.len(),
            dimension = snapshot.index().dimension(),
            built_by = %snapshot.info().embedder,
            "index loaded"
        );
        Ok(Self::from_snapshot(Arc::new(snapshot), embedder))
    }

    /// Serve an already-built snapshot
    pub fn from_snapshot(snapshot: Arc<IndexSnapshot>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            searcher: Searcher::new(snapshot),
            embedder,
        }
    }

    /// The loaded index and metadata
    pub fn snapshot(&self) -> &IndexSnapshot {
        self.searcher.snapshot()
    }

    /// Entity universe of the loaded metadata
    pub fn entities(&self) -> BTreeSet<String> {
        extract_universe(self.snapshot().metadata())
    }

    /// How `query` would be routed, without embedding it
    pub fn plan(&self, query: &str) -> RoutePlan {
        let universe = self.entities();
        let metadata = self.snapshot().metadata();

        RoutePlan {
            hits: detect_hits(query, &universe)
                .into_iter()
                .map(str::to_owned)
                .collect(),
            candidates: route(query, &universe, metadata),
        }
    }

    /// Rank up to `top_k` chunks for `query`
    pub async fn retrieve(&self, query: &str, top_k: usize) -> DomainResult<QueryResult> {
        let query_vector = self.embedder.embed(query).await?;

        let universe = self.entities();
        let candidates = route(query, &universe, self.snapshot().metadata());

        let result = self.searcher.search(&query_vector, &candidates, top_k)?;
        tracing::info!(
            top_k,
            restricted = !candidates.is_unrestricted(),
            hits = result.len(),
            "query answered"
        );

        Ok(result)
    }
}
