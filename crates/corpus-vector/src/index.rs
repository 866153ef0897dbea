//! The in-memory vector index.
//!
//! Owns the document records, the chunks, and their embeddings behind one
//! coarse reader/writer lock. Chunks and embeddings are stored merged in a
//! single entry list, so the two can never drift out of step: position `i`
//! holds chunk `i` and its vector, always.
//!
//! Search is an exact linear scan: every stored embedding is scored against
//! the query with the configured [`DistanceMetric`] and the results are
//! stably sorted, so equal scores keep their storage order and repeated
//! searches over an unmodified index return identical rankings.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use crate::distance::DistanceMetric;
use crate::error::{Error, Result};
use crate::types::{Chunk, Document, SearchResult, UNTITLED};

/// A chunk paired with its embedding.
///
/// Merging the two into one struct makes the chunk/embedding parity
/// invariant structural rather than something to re-check.
struct Entry {
    chunk: Chunk,
    embedding: Vec<f32>,
}

#[derive(Default)]
struct IndexInner {
    /// Document records by id.
    documents: HashMap<String, Document>,
    /// Chunk + embedding pairs in insertion order.
    entries: Vec<Entry>,
    /// Embedding width, pinned by the first add and released when the
    /// index empties again.
    dimensions: Option<usize>,
}

/// In-memory index over documents, chunks, and embeddings.
///
/// All mutations (`add_document`, `delete_document`, `clear`) take the
/// write lock; `search` and the read accessors take the read lock. A reader
/// can therefore never observe a document whose chunks are only partially
/// appended, or a chunk whose owning document is mid-removal.
///
/// The index is purely request-driven: no background tasks, no timers, no
/// I/O. State lives for the process lifetime and is gone on restart.
pub struct VectorIndex {
    inner: RwLock<IndexInner>,
    metric: DistanceMetric,
}

impl VectorIndex {
    /// Create an empty index using cosine similarity.
    pub fn new() -> Self {
        Self::with_metric(DistanceMetric::Cosine)
    }

    /// Create an empty index with a specific distance metric.
    pub fn with_metric(metric: DistanceMetric) -> Self {
        Self {
            inner: RwLock::new(IndexInner::default()),
            metric,
        }
    }

    /// The distance metric this index scores with.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Insert a document together with its chunks and embeddings.
    ///
    /// `chunks[i]` and `embeddings[i]` must correspond; each chunk receives
    /// `sequence_index == i` and the id `{document_id}_{i}`. An empty or
    /// whitespace title is replaced with a placeholder. The whole operation
    /// is all-or-nothing: validation runs before any collection is touched,
    /// and the write lock is held across the entire insert, so concurrent
    /// searches see either none of the document or all of it.
    ///
    /// # Errors
    ///
    /// - [`Error::DocumentExists`] for a duplicate id.
    /// - [`Error::ChunkEmbeddingMismatch`] when the sequences differ in length.
    /// - [`Error::EmptyChunks`] for non-empty content with no chunks.
    /// - [`Error::DimensionMismatch`] when an embedding's width differs from
    ///   the width already established by the index.
    /// - [`Error::InvalidEmbedding`] for NaN or infinite components.
    pub fn add_document(
        &self,
        document_id: &str,
        title: &str,
        content: &str,
        chunks: Vec<String>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Document> {
        let mut inner = self.inner.write();

        if inner.documents.contains_key(document_id) {
            return Err(Error::DocumentExists(document_id.to_string()));
        }
        if chunks.len() != embeddings.len() {
            return Err(Error::ChunkEmbeddingMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }
        if chunks.is_empty() && !content.trim().is_empty() {
            return Err(Error::EmptyChunks(document_id.to_string()));
        }

        let mut dimensions = inner.dimensions;
        for embedding in &embeddings {
            match dimensions {
                Some(expected) if embedding.len() != expected => {
                    return Err(Error::DimensionMismatch {
                        expected,
                        actual: embedding.len(),
                    });
                }
                Some(_) => {}
                None => dimensions = Some(embedding.len()),
            }
            if embedding.iter().any(|v| !v.is_finite()) {
                return Err(Error::InvalidEmbedding(format!(
                    "embedding for '{}' contains NaN or Inf",
                    document_id
                )));
            }
        }

        let title = if title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            title.to_string()
        };

        let document = Document {
            id: document_id.to_string(),
            title: title.clone(),
            content: content.to_string(),
            chunk_count: chunks.len(),
            created_at: Utc::now(),
        };

        for (i, (chunk_content, embedding)) in
            chunks.into_iter().zip(embeddings.into_iter()).enumerate()
        {
            inner.entries.push(Entry {
                chunk: Chunk {
                    id: format!("{}_{}", document_id, i),
                    document_id: document_id.to_string(),
                    title: title.clone(),
                    content: chunk_content,
                    sequence_index: i,
                },
                embedding,
            });
        }
        inner.documents.insert(document_id.to_string(), document.clone());
        inner.dimensions = dimensions;

        debug!(
            document_id,
            chunks = document.chunk_count,
            "Document indexed"
        );
        Ok(document)
    }

    /// Remove a document and every chunk/embedding that belongs to it.
    ///
    /// Returns `false` without touching anything when the id is unknown.
    /// Survivor entries keep their relative order.
    pub fn delete_document(&self, document_id: &str) -> bool {
        let mut inner = self.inner.write();

        if inner.documents.remove(document_id).is_none() {
            return false;
        }

        inner.entries.retain(|e| e.chunk.document_id != document_id);
        if inner.entries.is_empty() {
            inner.dimensions = None;
        }

        debug!(document_id, "Document deleted");
        true
    }

    /// Score every stored embedding against `query` and return the `top_k`
    /// best matches, sorted descending by score.
    ///
    /// Ties keep their storage order (the sort is stable), so repeated
    /// searches over an unmodified index are byte-for-byte reproducible.
    /// An empty index yields an empty result; `top_k` larger than the chunk
    /// count yields every chunk. Returned chunks are copies; attaching or
    /// mutating anything on them never affects the index.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<SearchResult> {
        let inner = self.inner.read();

        if inner.entries.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = inner
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, self.metric.similarity(query, &e.embedding)))
            .collect();

        // Stable sort: equal scores preserve insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(i, score)| SearchResult {
                chunk: inner.entries[i].chunk.clone(),
                score,
            })
            .collect()
    }

    /// Look up a document record by id.
    pub fn get_document(&self, document_id: &str) -> Option<Document> {
        self.inner.read().documents.get(document_id).cloned()
    }

    /// All document records, oldest first (ties broken by id).
    pub fn list_documents(&self) -> Vec<Document> {
        let inner = self.inner.read();
        let mut docs: Vec<Document> = inner.documents.values().cloned().collect();
        docs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        docs
    }

    /// Remove every document, chunk, and embedding.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.documents.clear();
        inner.entries.clear();
        inner.dimensions = None;
        debug!("Index cleared");
    }

    /// Number of chunks currently stored.
    pub fn count_chunks(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Number of documents currently stored.
    pub fn count_documents(&self) -> usize {
        self.inner.read().documents.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// A consistent snapshot of index statistics.
    pub fn stats(&self) -> IndexStats {
        let inner = self.inner.read();
        IndexStats {
            document_count: inner.documents.len(),
            chunk_count: inner.entries.len(),
            dimensions: inner.dimensions,
            metric: self.metric,
        }
    }
}

impl Default for VectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the index.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IndexStats {
    /// Number of documents.
    pub document_count: usize,
    /// Number of chunks (equal to the number of embeddings, always).
    pub chunk_count: usize,
    /// Embedding width, if any embeddings are stored.
    pub dimensions: Option<usize>,
    /// Distance metric in use.
    pub metric: DistanceMetric,
}
