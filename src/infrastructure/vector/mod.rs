//! Vector infrastructure components
//!
//! Provides the exact flat L2 index, the offline hashing embedder, and
//! persistence of the index/metadata artifact pair.

pub mod artifact_store;
pub mod embedding_service;
pub mod flat_index;

pub use artifact_store::{
    load_snapshot, save_snapshot, write_atomic, ArtifactPaths, IndexInfo, IndexSnapshot,
};
pub use embedding_service::HashingEmbedder;
pub use flat_index::{FlatL2Index, Neighbor};
