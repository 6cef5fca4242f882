//! Offline embedding service
//!
//! Deterministic feature-hashing embedder. Each lowercased word and each of
//! its character trigrams is hashed into one of `dimension` buckets with a
//! hash-derived sign, and the result is L2-normalised. Texts that share words
//! land close together, which is enough for development, tests and
//! air-gapped demos. Production ingestion should use the HTTP embedder.

use async_trait::async_trait;

use crate::domain::errors::{DomainResult, RetrievalError};
use crate::domain::ports::Embedder;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Feature-hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    max_batch_size: usize,
}

impl HashingEmbedder {
    /// Create a hashing embedder producing `dimension`-length vectors
    pub fn new(dimension: usize) -> DomainResult<Self> {
        if dimension == 0 {
            return Err(RetrievalError::InvalidConfig(
                "hashing embedder dimension must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            dimension,
            max_batch_size: 256,
        })
    }

    /// Override the batch size reported to callers
    #[must_use]
    pub const fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Output dimension
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed one text
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimension];

        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            self.accumulate(&mut embedding, word.as_bytes(), WORD_WEIGHT);

            let chars: Vec<char> = word.chars().collect();
            for trigram in chars.windows(3) {
                let trigram: String = trigram.iter().collect();
                self.accumulate(&mut embedding, trigram.as_bytes(), TRIGRAM_WEIGHT);
            }
        }

        normalize(&mut embedding);
        embedding
    }

    fn accumulate(&self, embedding: &mut [f32], feature: &[u8], weight: f32) {
        let hash = fnv1a(feature);
        let bucket = usize::try_from(hash % self.dimension as u64).unwrap_or_default();
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        embedding[bucket] += sign * weight;
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> &'static str {
        "hashing"
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Scale a vector to unit length; a zero vector becomes uniform
pub fn normalize(vector: &mut [f32]) {
    // f64 accumulation keeps the norm stable for wide vectors
    let magnitude = vector
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt();

    if magnitude > 1e-10 {
        for val in vector.iter_mut() {
            *val = (f64::from(*val) / magnitude) as f32;
        }
    } else if !vector.is_empty() {
        let uniform = 1.0 / (vector.len() as f32).sqrt();
        vector.fill(uniform);
    }
}
