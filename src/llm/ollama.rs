use std::time::Duration;

use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    generation::embeddings::request::GenerateEmbeddingsRequest,
};
use tokio::time::timeout;
use tracing::debug;

use crate::llm::client::{EmbeddingClient, LLMClient};
use crate::types::{AppError, Result};

const PROVIDER: &str = "ollama";

/// Client for a local Ollama server.
///
/// Implements both [`EmbeddingClient`] and [`LLMClient`]; the service
/// constructs one instance per role, since embedding and generation use
/// different models. Every request is wrapped in the configured timeout.
pub struct OllamaClient {
    client: Ollama,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: String, timeout: Duration) -> Self {
        let (host, port) = parse_base_url(base_url);
        let client = Ollama::new(host, port);

        Self {
            client,
            model,
            timeout,
        }
    }

    fn upstream(message: impl Into<String>) -> AppError {
        AppError::Upstream {
            provider: PROVIDER.to_string(),
            message: message.into(),
        }
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let response = timeout(self.timeout, self.client.send_chat_messages(request))
            .await
            .map_err(|_| {
                Self::upstream(format!(
                    "generation timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Self::upstream(format!("generation failed: {}", e)))?;

        Ok(response.message.content)
    }
}

/// Split a base URL like `http://localhost:11434` into a scheme-qualified
/// host and a port. A missing scheme defaults to http, a missing port to
/// Ollama's 11434.
fn parse_base_url(base_url: &str) -> (String, u16) {
    let (scheme, rest) = match base_url.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("http", base_url),
    };
    let (host, port) = match rest.split_once(':') {
        Some((host, port)) => (host, port.parse().unwrap_or(11434)),
        None => (rest, 11434),
    };
    (format!("{}://{}", scheme, host), port)
}

#[async_trait]
impl EmbeddingClient for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = GenerateEmbeddingsRequest::new(self.model.clone(), text.to_string().into());

        let response = timeout(self.timeout, self.client.generate_embeddings(request))
            .await
            .map_err(|_| {
                Self::upstream(format!(
                    "embedding timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Self::upstream(format!("embedding failed: {}", e)))?;

        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Self::upstream("embedding response was empty"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = GenerateEmbeddingsRequest::new(self.model.clone(), texts.to_vec().into());

        let response = timeout(self.timeout, self.client.generate_embeddings(request))
            .await
            .map_err(|_| {
                Self::upstream(format!(
                    "embedding timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Self::upstream(format!("embedding failed: {}", e)))?;

        if response.embeddings.len() != texts.len() {
            return Err(Self::upstream(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        debug!(count = texts.len(), model = %self.model, "Embedded batch");
        Ok(response.embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(vec![ChatMessage::user(prompt.to_string())]).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(vec![
            ChatMessage::system(system.to_string()),
            ChatMessage::user(prompt.to_string()),
        ])
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
