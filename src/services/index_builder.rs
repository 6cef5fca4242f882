//! Index building service
//!
//! Embeds every chunk text in chunk order and packs the vectors into a flat
//! L2 index whose row `i` is chunk `i`.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::errors::{DomainResult, RetrievalError};
use crate::domain::models::Chunk;
use crate::domain::ports::Embedder;
use crate::infrastructure::vector::{
    save_snapshot, ArtifactPaths, FlatL2Index, IndexInfo, IndexSnapshot,
};

/// Builds and persists index snapshots
pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
}

impl IndexBuilder {
    /// Builder embedding chunk text with `embedder`
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Embed `chunks` and pair the resulting index with them
    ///
    /// The vector dimension is taken from the first embedding; every later
    /// vector must match it.
    pub async fn build(&self, chunks: Vec<Chunk>) -> DomainResult<IndexSnapshot> {
        if chunks.is_empty() {
            return Err(RetrievalError::EmptyCorpus);
        }

        let mut index: Option<FlatL2Index> = None;
        let batch_size = self.embedder.max_batch_size().max(1);

        for (batch_no, batch) in chunks.chunks(batch_size).enumerate() {
            let texts: Vec<String> = batch.iter().map(|c| c.chunk_text.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts).await?;

            if vectors.len() != texts.len() {
                return Err(RetrievalError::Embedding(format!(
                    "embedder '{}' returned {} vectors for {} texts",
                    self.embedder.name(),
                    vectors.len(),
                    texts.len()
                )));
            }

            for vector in &vectors {
                if index.is_none() && vector.is_empty() {
                    return Err(RetrievalError::Embedding(
                        "embedder returned an empty vector".to_string(),
                    ));
                }
                index
                    .get_or_insert_with(|| FlatL2Index::new(vector.len()))
                    .add(vector)?;
            }

            tracing::debug!(batch = batch_no, size = batch.len(), "embedded chunk batch");
        }

        let index = index.ok_or(RetrievalError::EmptyCorpus)?;
        tracing::info!(
            rows = index.len(),
            dimension = index.dimension(),
            embedder = self.embedder.name(),
            "index built"
        );

        let info = IndexInfo {
            embedder: self.embedder.name().to_string(),
            built_at: Utc::now(),
        };
        IndexSnapshot::new(index, chunks, info)
    }

    /// Write the snapshot to disk, metadata last
    pub fn persist(&self, snapshot: &IndexSnapshot, paths: &ArtifactPaths) -> DomainResult<()> {
        save_snapshot(snapshot, paths)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::infrastructure::vector::{load_snapshot, HashingEmbedder};

    fn chunks(n: usize) -> Vec<Chunk> {
        (1..=n)
            .map(|i| Chunk {
                chunk_id: Chunk::id_for(i),
                article_title: "Toyota Corolla Review".to_string(),
                article_url: Some("https://example.co.il/corolla".to_string()),
                car_model: Some("Toyota".to_string()),
                chunk_text: format!("פסקה מספר {i} על הקורולה"),
            })
            .collect()
    }

    /// Returns vectors whose length grows with the call count
    struct DriftingEmbedder;

    #[async_trait]
    impl Embedder for DriftingEmbedder {
        fn name(&self) -> &'static str {
            "drifting"
        }

        async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, _)| vec![1.0; 2 + i])
                .collect())
        }

        fn max_batch_size(&self) -> usize {
            8
        }
    }

    /// Drops the last vector of every batch
    struct LossyEmbedder;

    #[async_trait]
    impl Embedder for LossyEmbedder {
        fn name(&self) -> &'static str {
            "lossy"
        }

        async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
            Ok(vec![vec![1.0, 0.0]; texts.len().saturating_sub(1)])
        }

        fn max_batch_size(&self) -> usize {
            8
        }
    }

    fn hashing(batch: usize) -> Arc<dyn Embedder> {
        Arc::new(HashingEmbedder::new(16).unwrap().with_max_batch_size(batch))
    }

    #[tokio::test]
    async fn test_empty_corpus_rejected() {
        let builder = IndexBuilder::new(hashing(4));
        assert!(matches!(
            builder.build(Vec::new()).await,
            Err(RetrievalError::EmptyCorpus)
        ));
    }

    #[tokio::test]
    async fn test_build_preserves_order_across_batches() {
        let embedder = HashingEmbedder::new(16).unwrap().with_max_batch_size(2);
        let builder = IndexBuilder::new(Arc::new(embedder.clone()));
        let input = chunks(5);

        let snapshot = builder.build(input.clone()).await.unwrap();

        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot.index().len(), 5);
        assert_eq!(snapshot.index().dimension(), 16);
        assert_eq!(snapshot.metadata(), input.as_slice());
        assert_eq!(snapshot.info().embedder, "hashing");
        for (row, chunk) in input.iter().enumerate() {
            assert_eq!(
                snapshot.index().vector(row).unwrap(),
                embedder.embed_text(&chunk.chunk_text).as_slice()
            );
        }
    }

    #[tokio::test]
    async fn test_dimension_mismatch_reports_row() {
        let builder = IndexBuilder::new(Arc::new(DriftingEmbedder));
        let err = builder.build(chunks(3)).await.unwrap_err();

        assert!(matches!(
            err,
            RetrievalError::DimensionMismatch {
                expected: 2,
                found: 3,
                row: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_short_embedder_output_rejected() {
        let builder = IndexBuilder::new(Arc::new(LossyEmbedder));
        assert!(matches!(
            builder.build(chunks(3)).await,
            Err(RetrievalError::Embedding(_))
        ));
    }

    #[tokio::test]
    async fn test_persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        let builder = IndexBuilder::new(hashing(3));

        let snapshot = builder.build(chunks(4)).await.unwrap();
        builder.persist(&snapshot, &paths).unwrap();

        let loaded = load_snapshot(&paths).unwrap();
        assert_eq!(loaded.index(), snapshot.index());
        assert_eq!(loaded.metadata(), snapshot.metadata());
    }
}
