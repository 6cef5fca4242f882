//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use carreview_rag::domain::models::PathsConfig;
use carreview_rag::{Chunk, Document, Embedder, HashingEmbedder};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Paths for every artifact inside `dir`
pub fn paths_in(dir: &Path) -> PathsConfig {
    PathsConfig {
        raw_dir: dir.join("raw"),
        chunks_path: dir.join("processed/chunks.json"),
        index_path: dir.join("index/index.bin"),
        metadata_path: dir.join("index/metadata.json"),
    }
}

/// Deterministic offline embedder
pub fn hashing_embedder() -> Arc<dyn Embedder> {
    Arc::new(HashingEmbedder::new(128).expect("valid dimension"))
}

/// A paragraph long enough to stand on its own under default chunking
pub fn paragraph(topic: &str, n: usize) -> String {
    format!("{topic}: פסקה מספר {n} בסקירה, עם מספיק מילים כדי לעבור את אורך המינימום של פסקה.")
}

/// The two-article corpus used by the end-to-end scenarios
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document::new(
            "toyota-corolla",
            "Toyota Corolla Review",
            Some("https://example.co.il/toyota-corolla".to_string()),
            (1..=4).map(|n| paragraph("הקורולה Corolla", n)).collect(),
        ),
        Document::new(
            "mazda-3",
            "Mazda 3 Review",
            Some("https://example.co.il/mazda-3".to_string()),
            (1..=3).map(|n| paragraph("המאזדה Mazda", n)).collect(),
        ),
    ]
}

/// Articles that each hold one short paragraph and one paragraph longer
/// than the default `max_paragraph_len`
pub fn windowed_documents() -> Vec<Document> {
    let long = |topic: &str| {
        (1..=16)
            .map(|n| format!("{topic} נבחנה בדרך מספר {n}, בעיר ובכביש המהיר, עם נוסעים ומטען."))
            .collect::<Vec<_>>()
            .join(" ")
    };
    vec![
        Document::new(
            "toyota-corolla-2023",
            "Toyota Corolla 2023 Review",
            Some("https://example.co.il/toyota-corolla-2023".to_string()),
            vec!["נהגנו בקורולה.".to_string(), long("הקורולה")],
        ),
        Document::new(
            "mazda-3",
            "Mazda 3 Review",
            Some("https://example.co.il/mazda-3".to_string()),
            vec!["נהגנו במאזדה.".to_string(), long("המאזדה")],
        ),
    ]
}

/// Write `documents` as raw article files under `raw_dir`
pub fn write_raw_documents(raw_dir: &Path, documents: &[Document]) {
    fs::create_dir_all(raw_dir).expect("create raw dir");
    for document in documents {
        let body = serde_json::json!({
            "title": document.title,
            "url": document.url,
            "paragraphs": document.paragraphs,
        });
        fs::write(raw_dir.join(format!("{}.txt", document.slug)), body.to_string())
            .expect("write raw article");
    }
}

/// Ids of a chunk list, in order
pub fn ids(chunks: &[Chunk]) -> Vec<String> {
    chunks.iter().map(|c| c.chunk_id.clone()).collect()
}
