//! Vehicle-model entity extraction
//!
//! Entities are plain title tokens: maximal runs of ASCII letters, Hebrew
//! letters (alef to tav, final forms included), ASCII digits and hyphens.
//! The chunker tags each chunk with the first title token; the extractor
//! turns the whole metadata table into the set of names a query may mention.

use std::collections::BTreeSet;

use crate::domain::models::Chunk;

/// Tokens shorter than this never enter the universe from titles.
const MIN_TITLE_TOKEN_LEN: usize = 3;

/// Returns true for characters that belong to an entity token
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || ('\u{05D0}'..='\u{05EA}').contains(&c)
}

/// Iterate over the entity tokens of a title, left to right
pub fn title_tokens(title: &str) -> impl Iterator<Item = &str> {
    title
        .split(|c: char| !is_token_char(c))
        .filter(|token| !token.is_empty())
}

/// First token of the title, used as the chunk's `car_model`
pub fn detect_model_name(title: &str) -> Option<String> {
    title_tokens(title).next().map(str::to_owned)
}

/// Derive the entity universe from the current metadata table
///
/// Every present `car_model` is added verbatim, plus every title token of at
/// least three characters. Case is preserved; matching is case-insensitive
/// at routing time.
pub fn extract_universe(metadata: &[Chunk]) -> BTreeSet<String> {
    let mut universe = BTreeSet::new();

    for record in metadata {
        if let Some(model) = record.car_model.as_deref().filter(|m| !m.is_empty()) {
            universe.insert(model.to_string());
        }

        for token in title_tokens(&record.article_title) {
            if token.chars().count() >= MIN_TITLE_TOKEN_LEN {
                universe.insert(token.to_string());
            }
        }
    }

    tracing::debug!(
        rows = metadata.len(),
        entities = universe.len(),
        "extracted entity universe"
    );

    universe
}
