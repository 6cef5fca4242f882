//! Persistence for the vector index / metadata pair
//!
//! The index is a bincode blob; the metadata is a pretty-printed UTF-8 JSON
//! array of chunk records. Both are written to temp files and renamed into
//! place. The old metadata file is moved aside before the index is swapped
//! and the new metadata is renamed last, so a present metadata file always
//! belongs to the index next to it. A failed index swap moves the old
//! metadata back.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::domain::errors::{ArtifactKind, DomainResult, RetrievalError};
use crate::domain::models::{Chunk, PathsConfig};

use super::flat_index::FlatL2Index;

/// Bumped whenever the index blob layout changes.
const INDEX_FORMAT_VERSION: u32 = 1;

/// Locations of the two co-located artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Vector index blob
    pub index_path: PathBuf,
    /// Metadata JSON
    pub metadata_path: PathBuf,
}

impl ArtifactPaths {
    /// Create artifact paths
    pub fn new(index_path: impl Into<PathBuf>, metadata_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            metadata_path: metadata_path.into(),
        }
    }

    /// Both artifacts inside `dir` with their default file names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("index.bin"), dir.join("metadata.json"))
    }
}

impl From<&PathsConfig> for ArtifactPaths {
    fn from(paths: &PathsConfig) -> Self {
        Self::new(&paths.index_path, &paths.metadata_path)
    }
}

/// Provenance recorded alongside the vectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    /// Name of the embedder that produced the vectors
    pub embedder: String,
    /// When the index was built
    pub built_at: DateTime<Utc>,
}

/// A vector index together with its row-aligned metadata table
///
/// The constructor is the only way to pair the two and it refuses a
/// row-count mismatch, so a snapshot always satisfies
/// `index.len() == metadata.len()`.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    index: FlatL2Index,
    metadata: Vec<Chunk>,
    info: IndexInfo,
}

impl IndexSnapshot {
    /// Pair an index with its metadata
    pub fn new(index: FlatL2Index, metadata: Vec<Chunk>, info: IndexInfo) -> DomainResult<Self> {
        if index.len() != metadata.len() {
            return Err(RetrievalError::InconsistentIndexMetadata {
                index_rows: index.len(),
                metadata_rows: metadata.len(),
            });
        }
        Ok(Self {
            index,
            metadata,
            info,
        })
    }

    /// The vector index
    pub const fn index(&self) -> &FlatL2Index {
        &self.index
    }

    /// The metadata table
    pub fn metadata(&self) -> &[Chunk] {
        &self.metadata
    }

    /// Build provenance
    pub const fn info(&self) -> &IndexInfo {
        &self.info
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// Returns true if the snapshot holds no rows
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct IndexFile {
    format_version: u32,
    info: IndexInfo,
    index: FlatL2Index,
}

/// Write both artifacts
pub fn save_snapshot(snapshot: &IndexSnapshot, paths: &ArtifactPaths) -> DomainResult<()> {
    let index_bytes = bincode::serialize(&IndexFile {
        format_version: INDEX_FORMAT_VERSION,
        info: snapshot.info.clone(),
        index: snapshot.index.clone(),
    })?;
    let metadata_bytes = serde_json::to_vec_pretty(&snapshot.metadata)?;

    let index_tmp = stage(&paths.index_path, &index_bytes)?;
    let metadata_tmp = stage(&paths.metadata_path, &metadata_bytes)?;

    let retired = retire(&paths.metadata_path)?;
    if let Err(e) = index_tmp.persist(&paths.index_path) {
        if let Some(retired) = &retired {
            if let Err(restore) = fs::rename(retired, &paths.metadata_path) {
                tracing::warn!(
                    metadata = %paths.metadata_path.display(),
                    error = %restore,
                    "could not restore previous metadata"
                );
            }
        }
        return Err(RetrievalError::Io(e.error));
    }
    metadata_tmp
        .persist(&paths.metadata_path)
        .map_err(|e| RetrievalError::Io(e.error))?;
    if let Some(retired) = retired {
        fs::remove_file(retired)?;
    }

    tracing::info!(
        rows = snapshot.len(),
        dimension = snapshot.index.dimension(),
        index = %paths.index_path.display(),
        metadata = %paths.metadata_path.display(),
        "persisted index artifacts"
    );

    Ok(())
}

/// Load both artifacts, failing fast on anything missing or inconsistent
pub fn load_snapshot(paths: &ArtifactPaths) -> DomainResult<IndexSnapshot> {
    require(ArtifactKind::Metadata, &paths.metadata_path)?;
    require(ArtifactKind::VectorIndex, &paths.index_path)?;

    let corrupt = |kind: ArtifactKind, path: &Path, reason: String| RetrievalError::CorruptArtifact {
        kind,
        path: path.to_path_buf(),
        reason,
    };

    let raw_index = fs::read(&paths.index_path)?;
    let file: IndexFile = bincode::deserialize(&raw_index)
        .map_err(|e| corrupt(ArtifactKind::VectorIndex, &paths.index_path, e.to_string()))?;

    if file.format_version != INDEX_FORMAT_VERSION {
        return Err(corrupt(
            ArtifactKind::VectorIndex,
            &paths.index_path,
            format!(
                "unsupported format version {} (expected {INDEX_FORMAT_VERSION})",
                file.format_version
            ),
        ));
    }
    file.index
        .validate()
        .map_err(|reason| corrupt(ArtifactKind::VectorIndex, &paths.index_path, reason))?;

    let raw_metadata = fs::read(&paths.metadata_path)?;
    let metadata: Vec<Chunk> = serde_json::from_slice(&raw_metadata)
        .map_err(|e| corrupt(ArtifactKind::Metadata, &paths.metadata_path, e.to_string()))?;

    let snapshot = IndexSnapshot::new(file.index, metadata, file.info)?;

    tracing::info!(
        rows = snapshot.len(),
        dimension = snapshot.index.dimension(),
        embedder = %snapshot.info.embedder,
        built_at = %snapshot.info.built_at,
        "loaded index artifacts"
    );

    Ok(snapshot)
}

/// Atomically replace `path` with `bytes`
pub fn write_atomic(path: &Path, bytes: &[u8]) -> DomainResult<()> {
    stage(path, bytes)?
        .persist(path)
        .map_err(|e| RetrievalError::Io(e.error))?;
    Ok(())
}

fn require(kind: ArtifactKind, path: &Path) -> DomainResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(RetrievalError::MissingArtifact {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Move an existing file to `<path>.prev`, returning where it went
fn retire(path: &Path) -> DomainResult<Option<PathBuf>> {
    let mut retired = path.as_os_str().to_owned();
    retired.push(".prev");
    let retired = PathBuf::from(retired);

    match fs::rename(path, &retired) {
        Ok(()) => Ok(Some(retired)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write `bytes` to a synced temp file next to `path`
fn stage(path: &Path, bytes: &[u8]) -> DomainResult<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}
