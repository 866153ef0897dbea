//! Retrieval Augmented Generation (RAG) pipeline.
//!
//! The pipeline flow:
//!
//! 1. **Ingestion** - [`chunker`] splits a document into bounded segments,
//!    the embedding gateway vectorizes them, and the pairs go into the
//!    vector index atomically.
//! 2. **Retrieval** - [`retriever`] embeds a query and ranks every stored
//!    chunk by similarity.
//! 3. **Generation** - [`qa`] assembles the retrieved chunks into a context
//!    prompt and asks the LLM for an answer grounded in them.
//!
//! [`cache`] memoizes text-to-vector lookups in front of the embedding
//! gateway; since a given text always embeds to the same vector, caching is
//! invisible to ranking.

/// Text chunking for document processing.
pub mod chunker;

/// Embedding memoization in front of the gateway.
pub mod cache;

/// Question answering over retrieved context.
pub mod qa;

/// Query-time retrieval orchestration.
pub mod retriever;

pub use chunker::TextChunker;
pub use retriever::Retriever;
