//! Text chunking domain models
//!
//! Models for splitting review articles into chunks for embedding.
//! All lengths are measured in characters (Unicode scalar values), not bytes,
//! so Hebrew and Latin text are bounded the same way.

use serde::{Deserialize, Serialize};

/// Configuration for paragraph chunking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Window size used when a paragraph is too long
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between consecutive windows
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Paragraphs longer than this are split into windows
    #[serde(default = "default_max_paragraph_len")]
    pub max_paragraph_len: usize,

    /// Paragraphs shorter than this are buffered and merged into the next one
    #[serde(default = "default_min_paragraph_len")]
    pub min_paragraph_len: usize,
}

const fn default_chunk_size() -> usize {
    500
}

const fn default_chunk_overlap() -> usize {
    100
}

const fn default_max_paragraph_len() -> usize {
    800
}

const fn default_min_paragraph_len() -> usize {
    50
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            max_paragraph_len: default_max_paragraph_len(),
            min_paragraph_len: default_min_paragraph_len(),
        }
    }
}

impl ChunkingConfig {
    /// Validate the chunking configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err("chunk_overlap must be less than chunk_size".to_string());
        }

        if self.max_paragraph_len == 0 {
            return Err("max_paragraph_len must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// A bounded unit of article text with provenance, the atomic unit of retrieval
///
/// Field names are part of the persisted metadata format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sequential identifier (`chunk-<n>`), unique within one corpus build
    pub chunk_id: String,

    /// Title of the source article
    pub article_title: String,

    /// URL of the source article
    pub article_url: Option<String>,

    /// Vehicle model detected from the article title
    pub car_model: Option<String>,

    /// The chunk text that gets embedded
    pub chunk_text: String,
}

impl Chunk {
    /// Format the identifier for the `n`-th emitted chunk (1-based)
    pub fn id_for(sequence: usize) -> String {
        format!("chunk-{sequence}")
    }

    /// Length of the chunk text in characters
    pub fn char_len(&self) -> usize {
        self.chunk_text.chars().count()
    }

    /// Single-line preview of the first `max_chars` characters
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self
            .chunk_text
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c });
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

/// Summary statistics for a chunking run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingSummary {
    /// Number of chunks produced
    pub total_chunks: usize,

    /// Total characters across all chunks (overlap counted twice)
    pub total_chars: usize,
}

impl ChunkingSummary {
    /// Summarise a chunk list
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        Self {
            total_chunks: chunks.len(),
            total_chars: chunks.iter().map(Chunk::char_len).sum(),
        }
    }

    /// Average chunk length in characters
    pub fn average_chunk_len(&self) -> f64 {
        if self.total_chunks == 0 {
            0.0
        } else {
            self.total_chars as f64 / self.total_chunks as f64
        }
    }
}
