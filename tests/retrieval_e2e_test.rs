//! End-to-end retrieval: raw articles -> ingestion -> routed queries.

mod common;

use std::collections::BTreeSet;

use carreview_rag::infrastructure::corpus::load_chunks;
use carreview_rag::{
    ArtifactPaths, CandidateSet, Chunker, IngestionPipeline, RetrievalError, RetrievalService,
};
use common::{
    hashing_embedder, paths_in, sample_documents, temp_dir, windowed_documents,
    write_raw_documents,
};

async fn ingested() -> (tempfile::TempDir, RetrievalService) {
    let dir = temp_dir();
    let paths = paths_in(dir.path());
    write_raw_documents(&paths.raw_dir, &sample_documents());

    let pipeline = IngestionPipeline::new(Chunker::new(), hashing_embedder(), paths.clone());
    let report = pipeline.run().await.expect("ingestion succeeds");
    assert_eq!(report.corpus.documents, 2);
    assert_eq!(report.index.rows, 7);

    let service = RetrievalService::open(&ArtifactPaths::from(&paths), hashing_embedder())
        .expect("artifacts load");
    (dir, service)
}

#[tokio::test]
async fn test_corolla_question_only_returns_corolla_chunks() {
    let (_dir, service) = ingested().await;

    let result = service.retrieve("מה דעתכם על Corolla?", 5).await.unwrap();

    assert_eq!(result.len(), 4);
    assert!(result
        .hits
        .iter()
        .all(|hit| hit.chunk.article_title == "Toyota Corolla Review"));
    for pair in result.hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[tokio::test]
async fn test_question_without_entity_searches_every_row() {
    let (_dir, service) = ingested().await;

    let plan = service.plan("איזה רכב משפחתי הכי שווה?");
    assert!(plan.hits.is_empty());
    assert_eq!(plan.candidates, CandidateSet::All);

    let result = service.retrieve("איזה רכב משפחתי הכי שווה?", 5).await.unwrap();
    assert_eq!(result.len(), 5);
}

#[tokio::test]
async fn test_oversized_top_k_returns_each_chunk_once() {
    let (_dir, service) = ingested().await;

    let result = service.retrieve("סקירה", 50).await.unwrap();
    assert_eq!(result.len(), 7);

    let rows: BTreeSet<usize> = result.hits.iter().map(|h| h.row).collect();
    assert_eq!(rows.len(), 7);
    assert!(result.hits.iter().all(|h| h.distance.is_finite()));
}

#[tokio::test]
async fn test_restricted_oversized_top_k_returns_candidates_only() {
    let (_dir, service) = ingested().await;

    let result = service.retrieve("mazda", 50).await.unwrap();
    assert_eq!(result.len(), 3);
    assert!(result.hits.iter().all(|h| h.chunk.car_model.as_deref() == Some("Mazda")));
}

#[tokio::test]
async fn test_context_block_cites_sources() {
    let (_dir, service) = ingested().await;

    let result = service.retrieve("Corolla", 1).await.unwrap();
    let context = result.context_block();

    assert!(context.starts_with("- source: Toyota Corolla Review (https://example.co.il/toyota-corolla) | chunk: chunk-"));
    assert_eq!(result.sources()[0].chunk_id, result.hits[0].chunk.chunk_id);
}

#[tokio::test]
async fn test_chunk_list_matches_index_metadata() {
    let dir = temp_dir();
    let paths = paths_in(dir.path());
    write_raw_documents(&paths.raw_dir, &sample_documents());

    let pipeline = IngestionPipeline::new(Chunker::new(), hashing_embedder(), paths.clone());
    pipeline.run().await.unwrap();

    let chunks = load_chunks(&paths.chunks_path).unwrap();
    let service = RetrievalService::open(&ArtifactPaths::from(&paths), hashing_embedder()).unwrap();

    assert_eq!(service.snapshot().metadata(), chunks.as_slice());
    assert_eq!(service.snapshot().index().len(), chunks.len());
    // Files are read in name order: mazda-3 before toyota-corolla
    assert_eq!(chunks[0].article_title, "Mazda 3 Review");
    assert_eq!(chunks[0].chunk_id, "chunk-1");
}

#[tokio::test]
async fn test_query_before_ingestion_fails() {
    let dir = temp_dir();
    let paths = paths_in(dir.path());

    let err = RetrievalService::open(&ArtifactPaths::from(&paths), hashing_embedder())
        .err()
        .expect("open must fail");
    assert!(matches!(err, RetrievalError::MissingArtifact { .. }));
    assert!(err.to_string().contains("Run ingestion first"));
}

#[tokio::test]
async fn test_windowed_articles_route_to_corolla_chunks() {
    let dir = temp_dir();
    let paths = paths_in(dir.path());
    let documents = windowed_documents();
    assert!(documents
        .iter()
        .all(|d| d.paragraphs[1].chars().count() > 800 && d.paragraphs[0].chars().count() < 50));
    write_raw_documents(&paths.raw_dir, &documents);

    IngestionPipeline::new(Chunker::new(), hashing_embedder(), paths.clone())
        .run()
        .await
        .unwrap();

    let chunks = load_chunks(&paths.chunks_path).unwrap();
    let corolla_rows: BTreeSet<usize> = chunks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.article_title.contains("Corolla"))
        .map(|(row, _)| row)
        .collect();
    // The short paragraph is glued onto the long one, which is then windowed
    assert!(corolla_rows.len() >= 2);
    let first_corolla = &chunks[*corolla_rows.iter().next().unwrap()];
    assert!(first_corolla.chunk_text.starts_with("נהגנו בקורולה. הקורולה"));
    assert!(chunks.iter().all(|c| c.char_len() <= 500));

    let service = RetrievalService::open(&ArtifactPaths::from(&paths), hashing_embedder()).unwrap();
    let query = "מה דעתכם על Corolla?";
    assert_eq!(
        service.plan(query).candidates,
        CandidateSet::Restricted(corolla_rows.clone())
    );

    let result = service.retrieve(query, 5).await.unwrap();
    assert!(!result.is_empty());
    assert!(result.len() <= corolla_rows.len());
    assert!(result
        .hits
        .iter()
        .all(|hit| hit.chunk.article_title.contains("Corolla") && corolla_rows.contains(&hit.row)));
    for pair in result.hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}
