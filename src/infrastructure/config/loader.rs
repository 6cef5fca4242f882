//! Layered configuration loading and validation

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::{Config, EmbeddingProviderKind};

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".carreview";

/// Prefix of environment overrides, nested with `__`
pub const ENV_PREFIX: &str = "CARREVIEW_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chunk_size: {0}. Must be greater than 0")]
    InvalidChunkSize(usize),

    #[error("Invalid chunk_overlap: {overlap}. Must be less than chunk_size ({chunk_size})")]
    InvalidChunkOverlap { overlap: usize, chunk_size: usize },

    #[error("Invalid max_paragraph_len: {0}. Must be greater than 0")]
    InvalidMaxParagraphLen(usize),

    #[error("Invalid top_k: {0}. Must be greater than 0")]
    InvalidTopK(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Invalid embedding max_batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid hashing dimension: {0}. Must be greater than 0")]
    InvalidDimension(usize),

    #[error("Embedding base_url cannot be empty for the http provider")]
    EmptyBaseUrl,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .carreview/config.yaml (project config)
    /// 3. .carreview/local.yaml (project local overrides, optional)
    /// 4. Environment variables (CARREVIEW_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let dir = Path::new(CONFIG_DIR);
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// `load_from_file` when a path is given, `load` otherwise
    pub fn resolve(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let chunking = &config.chunking;
        if chunking.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunking.chunk_size));
        }
        if chunking.chunk_overlap >= chunking.chunk_size {
            return Err(ConfigError::InvalidChunkOverlap {
                overlap: chunking.chunk_overlap,
                chunk_size: chunking.chunk_size,
            });
        }
        if chunking.max_paragraph_len == 0 {
            return Err(ConfigError::InvalidMaxParagraphLen(chunking.max_paragraph_len));
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        // Validate embedding config
        let embedding = &config.embedding;
        if embedding.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(embedding.max_batch_size));
        }
        match embedding.provider {
            EmbeddingProviderKind::Http if embedding.base_url.trim().is_empty() => {
                return Err(ConfigError::EmptyBaseUrl);
            }
            EmbeddingProviderKind::Hashing if embedding.dimension == 0 => {
                return Err(ConfigError::InvalidDimension(embedding.dimension));
            }
            _ => {}
        }

        Ok(())
    }
}
