//! Document management handlers.
//!
//! Upload runs the full ingestion pipeline - chunk, embed, index - as one
//! request; the index insert itself is atomic, so a concurrent search never
//! sees a half-ingested document.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::AppState;
use crate::rag::TextChunker;
use crate::types::{
    AppError, DocumentDetailResponse, DocumentListResponse, DocumentResponse, DocumentSummary,
    DocumentUploadRequest, MessageResponse, Result,
};

/// Minimum characters for uploaded content.
const MIN_CONTENT_CHARS: usize = 10;

/// Characters of content shown in listing previews.
const PREVIEW_CHARS: usize = 100;

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let cut: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        content.to_string()
    }
}

/// Upload a document into the knowledge base.
///
/// The document is split into chunks, every chunk is embedded, and the
/// whole set is indexed atomically for later retrieval.
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = DocumentUploadRequest,
    responses(
        (status = 200, description = "Document ingested", body = DocumentResponse),
        (status = 400, description = "Invalid request"),
        (status = 503, description = "Embedding provider unavailable")
    ),
    tag = "documents"
)]
pub async fn upload_document(
    State(state): State<AppState>,
    Json(payload): Json<DocumentUploadRequest>,
) -> Result<Json<DocumentResponse>> {
    let start = Instant::now();

    if payload.content.chars().count() < MIN_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "Document content must be at least {} characters",
            MIN_CONTENT_CHARS
        )));
    }

    let document_id = Uuid::new_v4().to_string()[..8].to_string();

    let chunker = TextChunker::new(state.config.rag.chunk_size, state.config.rag.chunk_overlap);
    let chunks = chunker.chunk(&payload.content);
    if chunks.is_empty() {
        return Err(AppError::Validation("Document content is empty".into()));
    }

    let embeddings = state.embedder.embed_batch(&chunks).await?;

    let document = state.index.add_document(
        &document_id,
        &payload.title,
        &payload.content,
        chunks,
        embeddings,
    )?;
    let content_length = document.content_length();

    tracing::info!(
        document_id = %document.id,
        chunks = document.chunk_count,
        content_length,
        duration_ms = start.elapsed().as_millis() as u64,
        "Document ingested"
    );

    Ok(Json(DocumentResponse {
        document_id: document.id,
        title: document.title,
        content_length,
        chunks_count: document.chunk_count,
        created_at: document.created_at,
    }))
}

/// List every indexed document.
#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "Documents listed", body = DocumentListResponse)
    ),
    tag = "documents"
)]
pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    let documents: Vec<DocumentSummary> = state
        .index
        .list_documents()
        .into_iter()
        .map(|doc| DocumentSummary {
            preview: preview(&doc.content),
            content_length: doc.content_length(),
            document_id: doc.id,
            title: doc.title,
            chunks_count: doc.chunk_count,
            created_at: doc.created_at,
        })
        .collect();

    Json(DocumentListResponse {
        total: documents.len(),
        total_chunks: state.index.count_chunks(),
        documents,
    })
}

/// Fetch a single document with its content.
#[utoipa::path(
    get,
    path = "/api/documents/{document_id}",
    params(("document_id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document found", body = DocumentDetailResponse),
        (status = 404, description = "Unknown document id")
    ),
    tag = "documents"
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentDetailResponse>> {
    let doc = state
        .index
        .get_document(&document_id)
        .ok_or_else(|| AppError::NotFound(format!("No document with id: {}", document_id)))?;

    Ok(Json(DocumentDetailResponse {
        content_length: doc.content_length(),
        document_id: doc.id,
        title: doc.title,
        content: doc.content,
        chunks_count: doc.chunk_count,
        created_at: doc.created_at,
    }))
}

/// Delete a document and every chunk derived from it.
#[utoipa::path(
    delete,
    path = "/api/documents/{document_id}",
    params(("document_id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 404, description = "Unknown document id")
    ),
    tag = "documents"
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.index.delete_document(&document_id) {
        return Err(AppError::NotFound(format!(
            "No document with id: {}",
            document_id
        )));
    }

    tracing::info!(document_id = %document_id, "Document deleted");

    Ok(Json(MessageResponse {
        message: format!("Document {} deleted", document_id),
    }))
}

/// Clear every document from the knowledge base.
#[utoipa::path(
    delete,
    path = "/api/documents",
    responses(
        (status = 200, description = "Index cleared", body = MessageResponse)
    ),
    tag = "documents"
)]
pub async fn clear_documents(State(state): State<AppState>) -> Json<MessageResponse> {
    let removed = state.index.count_documents();
    state.index.clear();

    tracing::info!(removed, "Index cleared");

    Json(MessageResponse {
        message: "All documents cleared".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "x".repeat(150);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_preview_keeps_short_content() {
        assert_eq!(preview("short"), "short");
    }
}
