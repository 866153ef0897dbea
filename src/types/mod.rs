//! Core types: API request/response shapes and the error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rag::qa::Confidence;

// ============= Document Management Types =============

/// Request to upload a document into the knowledge base.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentUploadRequest {
    /// Full document text. Must be at least 10 characters.
    pub content: String,
    /// Display title. Empty or missing titles get a placeholder.
    #[serde(default)]
    pub title: String,
}

/// A single indexed document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub document_id: String,
    pub title: String,
    /// Character count of the stored content.
    pub content_length: usize,
    pub chunks_count: usize,
    pub created_at: DateTime<Utc>,
}

/// A single document with its full content.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentDetailResponse {
    pub document_id: String,
    pub title: String,
    pub content: String,
    pub content_length: usize,
    pub chunks_count: usize,
    pub created_at: DateTime<Utc>,
}

/// One row of the document listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentSummary {
    pub document_id: String,
    pub title: String,
    pub content_length: usize,
    pub chunks_count: usize,
    pub created_at: DateTime<Utc>,
    /// First 100 characters of the content.
    pub preview: String,
}

/// Listing of every indexed document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentListResponse {
    pub total: usize,
    pub total_chunks: usize,
    pub documents: Vec<DocumentSummary>,
}

/// Generic acknowledgement for delete/clear operations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ============= Retrieval Types =============

/// Request for raw similarity search (no generation).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Query text to embed and match.
    pub query: String,
    /// Number of chunks to return.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// A retrieved chunk with its similarity score.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScoredChunk {
    pub id: String,
    pub document_id: String,
    pub title: String,
    pub content: String,
    pub sequence_index: usize,
    pub score: f32,
}

impl From<corpus_vector::SearchResult> for ScoredChunk {
    fn from(result: corpus_vector::SearchResult) -> Self {
        Self {
            id: result.chunk.id,
            document_id: result.chunk.document_id,
            title: result.chunk.title,
            content: result.chunk.content,
            sequence_index: result.chunk.sequence_index,
            score: result.score,
        }
    }
}

/// Response for raw similarity search.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<ScoredChunk>,
    pub total: usize,
}

// ============= RAG Question Answering Types =============

/// Request for retrieval-augmented question answering.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RagQueryRequest {
    /// The question to answer. Must be at least 3 characters.
    pub question: String,
    /// Number of chunks to retrieve as context (1..=20).
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Language the answer should be written in.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_top_k() -> usize {
    5
}

fn default_language() -> String {
    "English".to_string()
}

/// A source excerpt the answer was grounded on.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SourceChunk {
    pub document_title: String,
    /// Chunk content, truncated to 200 characters.
    pub content: String,
    /// Similarity score, rounded to three decimals.
    pub relevance_score: f32,
}

/// Response for retrieval-augmented question answering.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RagQueryResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceChunk>,
    pub confidence: Confidence,
}

// ============= Health Types =============

/// Liveness/status report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub documents: usize,
    pub chunks: usize,
}

// ============= Error Types =============

/// Service-level error taxonomy.
///
/// `Upstream` is deliberately distinct from `Validation` and `NotFound` so
/// operators can tell an infrastructure outage apart from user error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request input.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Unknown document or resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An embedding/generation provider was unreachable, returned a
    /// non-success response, or timed out. Never retried by the core.
    #[error("{provider} provider error: {message}")]
    Upstream {
        /// Provider name, e.g. "ollama".
        provider: String,
        /// Underlying cause, suitable for a user-facing message.
        message: String,
    },

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<corpus_vector::Error> for AppError {
    fn from(err: corpus_vector::Error) -> Self {
        // Every index error is a precondition violation on the caller's
        // input; the index itself has no failure modes of its own.
        AppError::Validation(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::Upstream { provider, message } => (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                format!("{} provider error: {}", provider, message),
            ),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                AppError::Validation("bad".into()),
                axum::http::StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("gone".into()),
                axum::http::StatusCode::NOT_FOUND,
            ),
            (
                AppError::Upstream {
                    provider: "ollama".into(),
                    message: "timeout".into(),
                },
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal("boom".into()),
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_index_errors_map_to_validation() {
        let err = corpus_vector::Error::ChunkEmbeddingMismatch {
            chunks: 2,
            embeddings: 1,
        };
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }

    #[test]
    fn test_upload_request_default_title() {
        let req: DocumentUploadRequest =
            serde_json::from_str(r#"{"content": "hello world content"}"#).unwrap();
        assert_eq!(req.title, "");
    }

    #[test]
    fn test_rag_query_defaults() {
        let req: RagQueryRequest = serde_json::from_str(r#"{"question": "why?"}"#).unwrap();
        assert_eq!(req.top_k, 5);
        assert_eq!(req.language, "English");
    }
}
