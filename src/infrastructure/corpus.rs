//! Raw article and chunk-list files
//!
//! The scraper leaves one JSON object per article in the raw directory
//! (`.txt` or `.json`). Corpus building writes the resulting chunk list as
//! a pretty-printed JSON array for the index builder to pick up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::errors::{ArtifactKind, DomainResult, RetrievalError};
use crate::domain::models::{Chunk, Document, RawArticle};
use crate::infrastructure::vector::write_atomic;

const RAW_EXTENSIONS: [&str; 2] = ["txt", "json"];

/// Read every raw article in `raw_dir`, ordered by file name
pub fn load_raw_documents(raw_dir: &Path) -> DomainResult<Vec<Document>> {
    if !raw_dir.is_dir() {
        return Err(RetrievalError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("raw article directory {} does not exist", raw_dir.display()),
        )));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(raw_dir)? {
        let path = entry?.path();
        if path.is_file() && has_raw_extension(&path) {
            files.push(path);
        }
    }
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let slug = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = fs::read_to_string(path)?;
        let article: RawArticle = serde_json::from_str(&content).map_err(|e| {
            RetrievalError::Serialization(format!("{}: {e}", path.display()))
        })?;

        tracing::debug!(slug = %slug, paragraphs = article.paragraphs.len(), "loaded raw article");
        documents.push(article.into_document(slug));
    }

    tracing::info!(dir = %raw_dir.display(), documents = documents.len(), "raw articles loaded");
    Ok(documents)
}

fn has_raw_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RAW_EXTENSIONS.iter().any(|raw| raw.eq_ignore_ascii_case(ext)))
}

/// Write the chunk list, replacing any previous one
pub fn save_chunks(chunks: &[Chunk], path: &Path) -> DomainResult<()> {
    let json = serde_json::to_vec_pretty(chunks)?;
    write_atomic(path, &json)?;
    tracing::debug!(path = %path.display(), chunks = chunks.len(), "chunk list saved");
    Ok(())
}

/// Read the chunk list written by [`save_chunks`]
pub fn load_chunks(path: &Path) -> DomainResult<Vec<Chunk>> {
    if !path.is_file() {
        return Err(RetrievalError::MissingArtifact {
            kind: ArtifactKind::Chunks,
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| RetrievalError::CorruptArtifact {
        kind: ArtifactKind::Chunks,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
