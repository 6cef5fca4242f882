//! Source article model
//!
//! A `Document` is one scraped review article: a title, an optional URL and
//! its paragraphs in reading order. Documents are the only input to the
//! chunker and are never modified.

use serde::{Deserialize, Serialize};

/// A scraped review article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier (the raw file stem)
    pub slug: String,

    /// Article title as published
    #[serde(default)]
    pub title: String,

    /// Canonical article URL, when the scraper recorded one
    #[serde(default)]
    pub url: Option<String>,

    /// Paragraph texts in document order
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

impl Document {
    /// Create a new document
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        url: Option<String>,
        paragraphs: Vec<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            url,
            paragraphs,
        }
    }
}

/// On-disk shape of a raw article file; the slug comes from the file name.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticle {
    /// Article title
    #[serde(default)]
    pub title: String,

    /// Article URL
    #[serde(default)]
    pub url: Option<String>,

    /// Paragraph texts
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

impl RawArticle {
    /// Attach a slug and turn the raw record into a `Document`
    pub fn into_document(self, slug: impl Into<String>) -> Document {
        Document::new(slug, self.title, self.url, self.paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_article_missing_fields_default() {
        let raw: RawArticle = serde_json::from_str(r#"{"title": "מאזדה 3"}"#).unwrap();
        let doc = raw.into_document("mazda-3");

        assert_eq!(doc.slug, "mazda-3");
        assert_eq!(doc.title, "מאזדה 3");
        assert!(doc.url.is_none());
        assert!(doc.paragraphs.is_empty());
    }
}
