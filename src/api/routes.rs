use axum::{
    Json, Router,
    routing::{get, post},
};
use utoipa::OpenApi;

use crate::AppState;
use crate::api::handlers;

/// Build the service router. State is attached by the caller.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route(
            "/api/documents",
            post(handlers::documents::upload_document)
                .get(handlers::documents::list_documents)
                .delete(handlers::documents::clear_documents),
        )
        .route(
            "/api/documents/{document_id}",
            get(handlers::documents::get_document).delete(handlers::documents::delete_document),
        )
        .route("/api/rag/query", post(handlers::rag::query))
        .route("/api/rag/search", post(handlers::rag::search))
        .route("/api-docs/openapi.json", get(openapi))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::api::ApiDoc::openapi())
}
