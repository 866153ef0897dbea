//! # corpus-vector
//!
//! An in-memory document and embedding index with exact brute-force
//! similarity search.
//!
//! ## Features
//!
//! - **Pure Rust**: No native dependencies, compiles anywhere Rust does
//! - **Exact search**: Every stored embedding is scored against the query;
//!   results are reproducible down to the tie-break order
//! - **Thread-Safe**: One coarse reader/writer lock over the whole index,
//!   so a search never observes a half-applied mutation
//! - **Atomic lifecycle**: A document, its chunks, and their embeddings are
//!   inserted and removed together
//!
//! ## Quick Start
//!
//! ```rust
//! use corpus_vector::VectorIndex;
//!
//! let index = VectorIndex::new();
//!
//! index.add_document(
//!     "doc1",
//!     "Getting started",
//!     "First paragraph.\n\nSecond paragraph.",
//!     vec!["First paragraph.".into(), "Second paragraph.".into()],
//!     vec![vec![1.0, 0.0], vec![0.0, 1.0]],
//! )?;
//!
//! let results = index.search(&[1.0, 0.0], 5);
//! assert_eq!(results[0].chunk.document_id, "doc1");
//! # Ok::<(), corpus_vector::Error>(())
//! ```
//!
//! ## Scope
//!
//! The index holds everything in memory and is lost on process exit. Search
//! is a linear scan, O(n * d) for n chunks of dimensionality d, which is the
//! right trade-off for the thousands-of-chunks scale this crate targets. The
//! scoring function is selected once at construction via [`DistanceMetric`],
//! so the comparison can be swapped without touching the search contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod index;
pub mod types;

// Re-exports for convenience
pub use distance::DistanceMetric;
pub use error::{Error, Result};
pub use index::{IndexStats, VectorIndex};
pub use types::{Chunk, Document, SearchResult};
