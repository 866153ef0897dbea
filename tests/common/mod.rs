//! Shared test fixtures: deterministic mock providers and app state.

// Each test binary pulls in this module; not every binary uses every fixture.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use corpus::{
    AppState, EmbeddingClient, LLMClient,
    types::{AppError, Result},
    utils::{Config, LlmConfig, RagConfig, ServerConfig},
};
use corpus_vector::VectorIndex;

/// Topics the mock embedder projects text onto.
const TOPICS: [&str; 3] = ["rust", "python", "ocean"];

/// Deterministic embedder: text becomes a 3-dimensional topic-count vector.
///
/// "rust is fast" -> [1, 0, 0], "python and rust" -> [1, 1, 0], and so on.
/// Same text, same vector, every time - which is all the retrieval pipeline
/// needs from an embedding model.
pub struct TopicEmbedder {
    pub calls: AtomicUsize,
    fail: bool,
}

impl TopicEmbedder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn vector_for(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        TOPICS
            .iter()
            .map(|topic| lower.matches(topic).count() as f32)
            .collect()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(AppError::Upstream {
                provider: "ollama".to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingClient for TopicEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Self::vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
    }

    fn model_name(&self) -> &str {
        "topic-embedder"
    }
}

/// Mock generation client with a canned answer; records the last prompt.
pub struct MockLLM {
    response: String,
    fail: bool,
    pub last_prompt: Mutex<String>,
}

impl MockLLM {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail: false,
            last_prompt: Mutex::new(String::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            last_prompt: Mutex::new(String::new()),
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(AppError::Upstream {
                provider: "ollama".to_string(),
                message: "generation timed out after 120s".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LLMClient for MockLLM {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.check()?;
        *self.last_prompt.lock() = prompt.to_string();
        Ok(self.response.clone())
    }

    async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.check()?;
        *self.last_prompt.lock() = prompt.to_string();
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-llm"
    }
}

pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        llm: LlmConfig {
            ollama_base_url: "http://localhost:11434".to_string(),
            model: "mock-llm".to_string(),
            embedding_model: "topic-embedder".to_string(),
            embedding_timeout_secs: 5,
            generation_timeout_secs: 5,
        },
        rag: RagConfig {
            chunk_size: 500,
            chunk_overlap: 50,
            top_k: 5,
        },
    })
}

/// App state wired to the deterministic mocks.
pub fn test_state(embedder: Arc<dyn EmbeddingClient>, llm: Arc<dyn LLMClient>) -> AppState {
    AppState {
        config: test_config(),
        index: Arc::new(VectorIndex::new()),
        embedder,
        llm,
    }
}

pub fn default_state() -> AppState {
    test_state(
        Arc::new(TopicEmbedder::new()),
        Arc::new(MockLLM::new("The answer, grounded in context.")),
    )
}
