//! # Corpus
//!
//! A retrieval-augmented generation (RAG) server: documents go in, get
//! split into chunks and embedded, and queries come back answered with the
//! most relevant chunks as grounding context.
//!
//! ## Overview
//!
//! Corpus can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `corpus-server` binary
//! 2. **As a library** - Import the pipeline components into your own project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use corpus::{Retriever, TextChunker, llm::OllamaClient};
//! use corpus_vector::VectorIndex;
//!
//! # async fn run() -> corpus::Result<()> {
//! let index = Arc::new(VectorIndex::new());
//! let embedder = Arc::new(OllamaClient::new(
//!     "http://localhost:11434",
//!     "nomic-embed-text".to_string(),
//!     std::time::Duration::from_secs(60),
//! ));
//!
//! // Ingest
//! let chunker = TextChunker::new(500, 50);
//! let chunks = chunker.chunk("First paragraph.\n\nSecond paragraph.");
//! let embeddings = embedder.embed_batch(&chunks).await?;
//! index.add_document("doc1", "Notes", "...", chunks, embeddings)?;
//!
//! // Retrieve
//! let retriever = Retriever::new(index, embedder);
//! let results = retriever.retrieve("what was the first paragraph?", 5).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - Embedding and generation provider clients
//! - [`rag`] - Chunking, retrieval, caching, and QA pipeline
//! - [`types`] - Request/response types and error handling
//! - [`utils`] - Configuration
//!
//! ## Architecture
//!
//! The vector index ([`corpus_vector`]) is the only stateful component. It
//! is constructed once at startup, wrapped in an `Arc`, and injected into
//! request handlers through [`AppState`] - there is no global singleton.
//! Everything else is stateless orchestration around it: the chunker and
//! index are pure computation, and the only network calls are to the
//! embedding/generation provider.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// LLM provider clients and abstractions.
pub mod llm;
/// Retrieval Augmented Generation (RAG) components.
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{EmbeddingClient, LLMClient, OllamaClient};
pub use rag::{Retriever, TextChunker};
pub use types::{AppError, Result};
pub use utils::Config;

use std::sync::Arc;

use corpus_vector::VectorIndex;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Arc<Config>,
    /// The in-memory vector index; lives for the process lifetime.
    pub index: Arc<VectorIndex>,
    /// Embedding gateway.
    pub embedder: Arc<dyn EmbeddingClient>,
    /// Generation gateway.
    pub llm: Arc<dyn LLMClient>,
}
