//! LLM provider clients and abstractions.
//!
//! Two capabilities are abstracted behind traits so the rest of the service
//! never touches a concrete provider:
//!
//! - [`EmbeddingClient`] - text in, fixed-length vector out
//! - [`LLMClient`] - prompt (plus optional system instructions) in,
//!   generated text out
//!
//! Both are implemented by [`OllamaClient`], which talks to a local Ollama
//! server. Every provider call carries a timeout; timeouts and connection
//! failures surface as [`AppError::Upstream`](crate::types::AppError) so
//! callers can distinguish an outage from bad input. Retries are the
//! caller's business - nothing in here retries silently.

/// Core client traits.
pub mod client;
/// Ollama-backed implementation of both traits.
pub mod ollama;

pub use client::{EmbeddingClient, LLMClient};
pub use ollama::OllamaClient;
