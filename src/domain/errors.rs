//! Domain errors for the retrieval core.

use std::path::PathBuf;

use thiserror::Error;

/// Which half of the persisted artifact pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The binary vector-index blob.
    VectorIndex,
    /// The JSON metadata table (chunk records).
    Metadata,
    /// The intermediate chunk list produced by corpus building.
    Chunks,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VectorIndex => write!(f, "vector index"),
            Self::Metadata => write!(f, "metadata"),
            Self::Chunks => write!(f, "chunk list"),
        }
    }
}

/// Errors surfaced by chunking, index building, loading and search.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("No chunks to index; build the corpus first")]
    EmptyCorpus,

    #[error("{kind} not found at {}. Run ingestion first.", path.display())]
    MissingArtifact { kind: ArtifactKind, path: PathBuf },

    #[error("Embedding dimension mismatch at row {row}: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        row: usize,
    },

    #[error(
        "Vector index has {index_rows} rows but metadata has {metadata_rows}; re-run ingestion"
    )]
    InconsistentIndexMetadata {
        index_rows: usize,
        metadata_rows: usize,
    },

    #[error("Corrupt {kind} at {}: {reason}", path.display())]
    CorruptArtifact {
        kind: ArtifactKind,
        path: PathBuf,
        reason: String,
    },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid top_k: {0}. Must be greater than 0")]
    InvalidTopK(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result alias for the retrieval core
pub type DomainResult<T> = Result<T, RetrievalError>;

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for RetrievalError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_message_mentions_ingestion() {
        let err = RetrievalError::MissingArtifact {
            kind: ArtifactKind::Metadata,
            path: PathBuf::from("data/index/metadata.json"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("metadata not found at data/index/metadata.json"));
        assert!(msg.contains("Run ingestion first"));
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = RetrievalError::DimensionMismatch {
            expected: 384,
            found: 383,
            row: 7,
        };
        assert_eq!(
            err.to_string(),
            "Embedding dimension mismatch at row 7: expected 384, found 383"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: RetrievalError = json_err.into();
        assert!(matches!(err, RetrievalError::Serialization(_)));
    }
}
