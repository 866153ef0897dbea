//! Provider-agnostic client traits.

use async_trait::async_trait;

use crate::types::Result;

/// Converts text into a fixed-length embedding vector.
///
/// The vector index never calls this itself; embedding happens at the
/// service edge (ingestion and query handling), so the index stays pure
/// in-memory computation.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving order.
    ///
    /// Returns exactly one vector per input text.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// The embedding model identifier.
    fn model_name(&self) -> &str;
}

/// Generates text from a prompt.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with system instructions.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// The generation model identifier.
    fn model_name(&self) -> &str;
}
