//! Paragraph chunking service
//!
//! Turns the paragraph sequence of each review article into bounded chunks.
//! Short paragraphs are buffered and glued onto the next regular paragraph;
//! oversized paragraphs are cut into overlapping character windows.

use std::borrow::Cow;

use crate::domain::errors::{DomainResult, RetrievalError};
use crate::domain::models::{Chunk, ChunkingConfig, Document};

use super::entity_extractor::detect_model_name;

/// Paragraph-aware chunker
///
/// Chunk ids are assigned sequentially across all documents passed to one
/// [`Chunker::segment`] call, so the same input always yields the same ids.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a new chunker with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new chunker with custom configuration
    pub fn with_config(config: ChunkingConfig) -> DomainResult<Self> {
        config
            .validate()
            .map_err(|e| RetrievalError::InvalidConfig(format!("Invalid chunking config: {e}")))?;

        Ok(Self { config })
    }

    /// Segment documents into chunks, in document then paragraph order
    pub fn segment(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for document in documents {
            let before = chunks.len();
            self.segment_document(document, &mut chunks);
            tracing::debug!(
                slug = %document.slug,
                paragraphs = document.paragraphs.len(),
                chunks = chunks.len() - before,
                "segmented document"
            );
        }

        tracing::info!(
            documents = documents.len(),
            chunks = chunks.len(),
            "segmentation complete"
        );

        chunks
    }

    fn segment_document(&self, document: &Document, chunks: &mut Vec<Chunk>) {
        let car_model = detect_model_name(&document.title);
        let mut emit = |text: &str| {
            // Windows may start or end inside a whitespace run; a window made
            // only of whitespace is dropped.
            let text = text.trim();
            if text.is_empty() {
                return;
            }
            chunks.push(Chunk {
                chunk_id: Chunk::id_for(chunks.len() + 1),
                article_title: document.title.clone(),
                article_url: document.url.clone(),
                car_model: car_model.clone(),
                chunk_text: text.to_string(),
            });
        };

        let mut buffer = String::new();

        for raw in &document.paragraphs {
            let paragraph = raw.trim();
            if paragraph.is_empty() {
                continue;
            }

            if paragraph.chars().count() < self.config.min_paragraph_len {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(paragraph);
                continue;
            }

            let paragraph: Cow<'_, str> = if buffer.is_empty() {
                Cow::Borrowed(paragraph)
            } else {
                let merged = format!("{buffer} {paragraph}");
                buffer.clear();
                Cow::Owned(merged)
            };

            if paragraph.chars().count() > self.config.max_paragraph_len {
                for window in split_paragraph(
                    &paragraph,
                    self.config.chunk_size,
                    self.config.chunk_overlap,
                ) {
                    emit(window);
                }
            } else {
                emit(paragraph.as_ref());
            }
        }

        // Trailing short text is kept as one final chunk, whatever its length.
        if !buffer.is_empty() {
            emit(buffer.as_str());
        }
    }
}

/// Split text into overlapping character windows
///
/// Windows are `[start, start + max_len)` in character positions; the next
/// window starts `overlap` characters before the previous end, and splitting
/// stops once the start reaches the end of the text. Windows are literal
/// slices, whitespace included. Text no longer than `max_len` is returned
/// whole, and so is any text when `overlap >= max_len`, since windows could
/// not advance.
pub fn split_paragraph(text: &str, max_len: usize, overlap: usize) -> Vec<&str> {
    let offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
    let len = offsets.len();

    if len <= max_len || overlap >= max_len {
        return vec![text];
    }

    let byte_at = |position: usize| offsets.get(position).copied().unwrap_or(text.len());

    let mut windows = Vec::new();
    let mut start = 0;
    while start < len {
        let end = start + max_len;
        windows.push(&text[byte_at(start)..byte_at(end)]);

        start = end.saturating_sub(overlap);
        if start >= len {
            break;
        }
    }

    windows
}
