//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Raw article and chunk-list files
//! - Vector index, offline embedder and artifact persistence

pub mod config;
pub mod corpus;
pub mod logging;
pub mod vector;
