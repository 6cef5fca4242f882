//! Entity-based query routing
//!
//! A query that names a known vehicle model is confined to the rows that
//! talk about that model. Matching is case-insensitive substring containment
//! in both directions the data allows: entity inside query, hit inside title.

use std::collections::BTreeSet;

use crate::domain::models::{CandidateSet, Chunk};

/// Entities from `universe` mentioned anywhere in `query`
///
/// Returned in the universe's (sorted) order, original casing preserved.
pub fn detect_hits<'a>(query: &str, universe: &'a BTreeSet<String>) -> Vec<&'a str> {
    let query = query.to_lowercase();

    universe
        .iter()
        .filter(|entity| !entity.is_empty() && query.contains(&entity.to_lowercase()))
        .map(String::as_str)
        .collect()
}

/// Decide which rows of `metadata` the query may match
///
/// Without hits, or when hits select no row, every row stays a candidate.
pub fn route(query: &str, universe: &BTreeSet<String>, metadata: &[Chunk]) -> CandidateSet {
    let hits: Vec<String> = detect_hits(query, universe)
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    if hits.is_empty() {
        tracing::debug!("no entity hits, searching all rows");
        return CandidateSet::All;
    }

    let rows: BTreeSet<usize> = metadata
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_any(record, &hits))
        .map(|(row, _)| row)
        .collect();

    tracing::debug!(hits = ?hits, candidates = rows.len(), "routed query");

    CandidateSet::from_rows(rows)
}

fn matches_any(record: &Chunk, lowered_hits: &[String]) -> bool {
    let title = record.article_title.to_lowercase();
    let model = record.car_model.as_deref().map(str::to_lowercase);

    lowered_hits
        .iter()
        .any(|hit| title.contains(hit.as_str()) || model.as_deref() == Some(hit.as_str()))
}
