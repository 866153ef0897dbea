//! API request handlers.

/// Document ingestion and management handlers.
pub mod documents;
/// Health/status handler.
pub mod health;
/// Retrieval and question-answering handlers.
pub mod rag;
