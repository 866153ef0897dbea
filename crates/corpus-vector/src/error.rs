//! Error types for corpus-vector.

use thiserror::Error;

/// Result type for corpus-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in corpus-vector operations.
///
/// Every failing operation leaves the index exactly as it was: validation
/// happens before any collection is touched.
#[derive(Error, Debug)]
pub enum Error {
    /// A document with the same id is already indexed.
    #[error("Document '{0}' already exists")]
    DocumentExists(String),

    /// The chunk and embedding sequences differ in length.
    #[error("Chunk/embedding count mismatch: {chunks} chunks, {embeddings} embeddings")]
    ChunkEmbeddingMismatch {
        /// Number of chunks provided.
        chunks: usize,
        /// Number of embeddings provided.
        embeddings: usize,
    },

    /// Non-empty document content produced no chunks.
    #[error("Document '{0}' has content but no chunks")]
    EmptyChunks(String),

    /// Embedding width differs from the width already established by the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Established dimensionality.
        expected: usize,
        /// Dimensionality of the offending embedding.
        actual: usize,
    },

    /// Embedding contains a non-finite component (NaN or infinity).
    #[error("Invalid embedding: {0}")]
    InvalidEmbedding(String),
}
