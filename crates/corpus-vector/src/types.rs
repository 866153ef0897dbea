//! Record types for corpus-vector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title substituted when a document is ingested with an empty title.
pub const UNTITLED: &str = "Untitled Document";

/// A document record.
///
/// Created atomically with its full set of chunks and embeddings and
/// immutable afterwards; the only way to change a document is to delete it
/// and ingest it again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque unique identifier, assigned by the caller at ingestion time.
    pub id: String,
    /// Display label. Never empty: the index substitutes [`UNTITLED`].
    pub title: String,
    /// Full original text.
    pub content: String,
    /// Number of chunks derived from this document.
    pub chunk_count: usize,
    /// Ingestion timestamp.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Character count of the document content.
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// A text segment derived from a document, the unit of embedding and
/// retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// `{document_id}_{sequence_index}`, unique within the index.
    pub id: String,
    /// Owning document.
    pub document_id: String,
    /// Denormalized copy of the owning document's title, fixed at creation.
    pub title: String,
    /// The segment text.
    pub content: String,
    /// Zero-based position within the document's chunk sequence.
    pub sequence_index: usize,
}

/// A chunk annotated with its similarity score against a query.
///
/// The chunk is a copy of index state; callers own it outright and can do
/// whatever they like with it without affecting the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Similarity score, higher is more similar.
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_length_counts_chars_not_bytes() {
        let doc = Document {
            id: "d1".to_string(),
            title: "測試".to_string(),
            content: "你好世界".to_string(),
            chunk_count: 1,
            created_at: Utc::now(),
        };
        assert_eq!(doc.content_length(), 4);
        assert_eq!(doc.content.len(), 12);
    }
}
