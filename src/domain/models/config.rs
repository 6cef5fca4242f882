//! Application configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::chunking::ChunkingConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Paragraph chunking parameters
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Query-time retrieval parameters
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Artifact locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Embedder selection and connection settings
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Maximum number of ranked results per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

const fn default_top_k() -> usize {
    5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// Locations of the ingestion inputs and the persisted artifact pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PathsConfig {
    /// Directory holding scraped raw article files
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,

    /// Intermediate chunk list written by corpus building
    #[serde(default = "default_chunks_path")]
    pub chunks_path: PathBuf,

    /// Binary vector index blob
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Metadata table, row-aligned with the index
    #[serde(default = "default_metadata_path")]
    pub metadata_path: PathBuf,
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_chunks_path() -> PathBuf {
    PathBuf::from("data/processed/chunks.json")
}

fn default_index_path() -> PathBuf {
    PathBuf::from("data/index/index.bin")
}

fn default_metadata_path() -> PathBuf {
    PathBuf::from("data/index/metadata.json")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            chunks_path: default_chunks_path(),
            index_path: default_index_path(),
            metadata_path: default_metadata_path(),
        }
    }
}

/// Embedding backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// OpenAI-compatible `/embeddings` HTTP endpoint
    Http,
    /// Deterministic offline feature hashing
    Hashing,
}

impl std::fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Hashing => write!(f, "hashing"),
        }
    }
}

/// Embedder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Which embedder to construct
    #[serde(default = "default_provider")]
    pub provider: EmbeddingProviderKind,

    /// Base URL of the embeddings API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to `OPENAI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum texts per embedding request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Vector dimension of the hashing embedder
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

const fn default_provider() -> EmbeddingProviderKind {
    EmbeddingProviderKind::Http
}

fn default_base_url() -> String {
    "http://localhost:8080/v1".to_string()
}

fn default_model() -> String {
    "intfloat/multilingual-e5-large".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_max_batch_size() -> usize {
    64
}

const fn default_dimension() -> usize {
    384
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_batch_size: default_max_batch_size(),
            dimension: default_dimension(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (console only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
