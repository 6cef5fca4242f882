//! Domain layer for the retrieval core
//!
//! This module contains the data model, the error taxonomy and the ports the
//! core depends on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ArtifactKind, DomainResult, RetrievalError};
