//! Retrieval and question-answering handlers.

use std::time::Instant;

use axum::{Json, extract::State};

use crate::AppState;
use crate::rag::{Retriever, qa};
use crate::types::{
    AppError, RagQueryRequest, RagQueryResponse, Result, ScoredChunk, SearchRequest,
    SearchResponse, SourceChunk,
};

/// Minimum characters for a question.
const MIN_QUESTION_CHARS: usize = 3;

/// Largest permitted `top_k`.
const MAX_TOP_K: usize = 20;

/// Characters of chunk content included per source excerpt.
const SOURCE_CHARS: usize = 200;

fn validate_top_k(top_k: usize) -> Result<()> {
    if top_k == 0 || top_k > MAX_TOP_K {
        return Err(AppError::Validation(format!(
            "top_k must be between 1 and {}",
            MAX_TOP_K
        )));
    }
    Ok(())
}

fn excerpt(content: &str) -> String {
    if content.chars().count() > SOURCE_CHARS {
        let cut: String = content.chars().take(SOURCE_CHARS).collect();
        format!("{}...", cut)
    } else {
        content.to_string()
    }
}

fn round3(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}

/// Retrieval-augmented question answering.
///
/// Retrieves the chunks most relevant to the question, hands them to the
/// generation provider as grounding context, and returns the answer with
/// its sources and a retrieval confidence bucket.
#[utoipa::path(
    post,
    path = "/api/rag/query",
    request_body = RagQueryRequest,
    responses(
        (status = 200, description = "Question answered", body = RagQueryResponse),
        (status = 400, description = "Invalid request or empty knowledge base"),
        (status = 503, description = "Provider unavailable")
    ),
    tag = "rag"
)]
pub async fn query(
    State(state): State<AppState>,
    Json(payload): Json<RagQueryRequest>,
) -> Result<Json<RagQueryResponse>> {
    let start = Instant::now();

    if payload.question.chars().count() < MIN_QUESTION_CHARS {
        return Err(AppError::Validation(format!(
            "Question must be at least {} characters",
            MIN_QUESTION_CHARS
        )));
    }
    validate_top_k(payload.top_k)?;

    if state.index.count_chunks() == 0 {
        return Err(AppError::Validation(
            "The knowledge base is empty; upload documents first".into(),
        ));
    }

    let retriever = Retriever::new(state.index.clone(), state.embedder.clone());
    let results = retriever.retrieve(&payload.question, payload.top_k).await?;

    let sources: Vec<SourceChunk> = results
        .iter()
        .map(|r| SourceChunk {
            document_title: r.chunk.title.clone(),
            content: excerpt(&r.chunk.content),
            relevance_score: round3(r.score),
        })
        .collect();

    let (answer, confidence) =
        qa::answer(state.llm.as_ref(), &payload.question, &results, &payload.language).await?;

    tracing::info!(
        top_k = payload.top_k,
        sources = sources.len(),
        confidence = confidence.as_str(),
        duration_ms = start.elapsed().as_millis() as u64,
        "RAG query answered"
    );

    Ok(Json(RagQueryResponse {
        question: payload.question,
        answer,
        sources,
        confidence,
    }))
}

/// Raw similarity search with no generation step.
#[utoipa::path(
    post,
    path = "/api/rag/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Search completed", body = SearchResponse),
        (status = 400, description = "Invalid request"),
        (status = 503, description = "Embedding provider unavailable")
    ),
    tag = "rag"
)]
pub async fn search(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let start = Instant::now();

    if payload.query.trim().is_empty() {
        return Err(AppError::Validation("Query must not be empty".into()));
    }
    validate_top_k(payload.top_k)?;

    let retriever = Retriever::new(state.index.clone(), state.embedder.clone());
    let results = retriever.retrieve(&payload.query, payload.top_k).await?;

    let results: Vec<ScoredChunk> = results.into_iter().map(ScoredChunk::from).collect();
    let total = results.len();

    tracing::info!(
        top_k = payload.top_k,
        results = total,
        duration_ms = start.elapsed().as_millis() as u64,
        "Search completed"
    );

    Ok(Json(SearchResponse { results, total }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_top_k_bounds() {
        assert!(validate_top_k(0).is_err());
        assert!(validate_top_k(1).is_ok());
        assert!(validate_top_k(20).is_ok());
        assert!(validate_top_k(21).is_err());
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "y".repeat(300);
        let e = excerpt(&long);
        assert_eq!(e.chars().count(), SOURCE_CHARS + 3);
        assert!(e.ends_with("..."));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.707_106_78), 0.707);
        assert_eq!(round3(1.0), 1.0);
        assert_eq!(round3(-0.123_456), -0.123);
    }
}
