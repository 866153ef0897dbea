//! Query-time retrieval orchestration.
//!
//! Composes the embedding gateway and the vector index: embed the query,
//! rank every stored chunk against it, return the best `top_k` with their
//! scores. The only suspension point is the embedding call; the index
//! itself is pure in-memory computation.

use std::sync::Arc;

use corpus_vector::{SearchResult, VectorIndex};
use tracing::debug;

use crate::llm::EmbeddingClient;
use crate::types::Result;

/// Finds the chunks most relevant to a query.
pub struct Retriever {
    index: Arc<VectorIndex>,
    embedder: Arc<dyn EmbeddingClient>,
}

impl Retriever {
    pub fn new(index: Arc<VectorIndex>, embedder: Arc<dyn EmbeddingClient>) -> Self {
        Self { index, embedder }
    }

    /// Retrieve the `top_k` chunks most similar to `query`.
    ///
    /// An empty index short-circuits to an empty result without touching
    /// the gateway, so "no data" is cleanly distinguishable from "the
    /// embedding provider failed". Gateway errors propagate unchanged -
    /// there is no fallback vector, since a degraded search would silently
    /// corrupt ranking quality.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let results = self.index.search(&query_embedding, top_k);

        debug!(
            top_k,
            returned = results.len(),
            "Retrieval completed"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds text as a fixed direction; counts calls.
    struct StubEmbedder {
        vector: Vec<f32>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubEmbedder {
        fn returning(vector: Vec<f32>) -> Self {
            Self {
                vector,
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                vector: Vec::new(),
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EmbeddingClient for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Upstream {
                    provider: "ollama".to_string(),
                    message: "connection refused".to_string(),
                });
            }
            Ok(self.vector.clone())
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| self.vector.clone()).collect())
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn seeded_index() -> Arc<VectorIndex> {
        let index = VectorIndex::new();
        index
            .add_document(
                "doc1",
                "Directions",
                "x axis\n\ny axis\n\ndiagonal",
                vec!["x axis".into(), "y axis".into(), "diagonal".into()],
                vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
            )
            .unwrap();
        Arc::new(index)
    }

    #[tokio::test]
    async fn test_retrieve_ranks_by_similarity() {
        let retriever = Retriever::new(
            seeded_index(),
            Arc::new(StubEmbedder::returning(vec![1.0, 0.0])),
        );

        let results = retriever.retrieve("which way is x?", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.content, "x axis");
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[1].chunk.content, "diagonal");
    }

    #[tokio::test]
    async fn test_empty_index_skips_gateway() {
        let embedder = Arc::new(StubEmbedder::returning(vec![1.0, 0.0]));
        let retriever = Retriever::new(Arc::new(VectorIndex::new()), embedder.clone());

        let results = retriever.retrieve("anything", 5).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates_unchanged() {
        let retriever = Retriever::new(seeded_index(), Arc::new(StubEmbedder::failing()));

        let err = retriever.retrieve("anything", 5).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }));
    }
}
