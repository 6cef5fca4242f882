//! Port trait definitions (Hexagonal Architecture)
//!
//! The retrieval core depends on a single outside collaborator:
//! - Embedder: maps text to fixed-length, unit-normalised vectors
//!
//! Adapters in `adapters::embeddings` implement it; the core never knows
//! which model sits behind the trait.

pub mod embedding;

pub use embedding::Embedder;
