//! HTTP API handlers and routes.
//!
//! The REST layer for Corpus, built on Axum: validation, calls into the
//! RAG pipeline and vector index, and response shaping. Nothing here holds
//! state of its own.
//!
//! # API Endpoints
//!
//! ## Documents (`/api/documents`)
//! - `POST   /api/documents` - Upload a document (chunked + embedded + indexed)
//! - `GET    /api/documents` - List indexed documents
//! - `GET    /api/documents/{document_id}` - Fetch one document
//! - `DELETE /api/documents/{document_id}` - Delete one document
//! - `DELETE /api/documents` - Clear the whole index
//!
//! ## RAG (`/api/rag`)
//! - `POST /api/rag/query` - Retrieval-augmented question answering
//! - `POST /api/rag/search` - Raw similarity search, no generation
//!
//! ## Meta
//! - `GET /api/health` - Liveness and index counters
//! - `GET /api-docs/openapi.json` - OpenAPI document

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

/// OpenAPI document for the whole service.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::documents::upload_document,
        handlers::documents::list_documents,
        handlers::documents::get_document,
        handlers::documents::delete_document,
        handlers::documents::clear_documents,
        handlers::rag::query,
        handlers::rag::search,
        handlers::health::health,
    ),
    components(schemas(
        crate::types::DocumentUploadRequest,
        crate::types::DocumentResponse,
        crate::types::DocumentDetailResponse,
        crate::types::DocumentSummary,
        crate::types::DocumentListResponse,
        crate::types::MessageResponse,
        crate::types::SearchRequest,
        crate::types::SearchResponse,
        crate::types::ScoredChunk,
        crate::types::RagQueryRequest,
        crate::types::RagQueryResponse,
        crate::types::SourceChunk,
        crate::types::HealthResponse,
        crate::rag::qa::Confidence,
    )),
    tags(
        (name = "documents", description = "Document ingestion and management"),
        (name = "rag", description = "Retrieval and question answering"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;
