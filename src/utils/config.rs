use serde::Deserialize;
use std::env;

/// Service configuration, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub rag: RagConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama server.
    pub ollama_base_url: String,
    /// Chat model used for answer generation.
    pub model: String,
    /// Model used for embeddings.
    pub embedding_model: String,
    /// Timeout for a single embedding request, in seconds.
    pub embedding_timeout_secs: u64,
    /// Timeout for a single generation request, in seconds.
    pub generation_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    /// Maximum characters per document chunk.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks, in characters.
    pub chunk_overlap: usize,
    /// Default number of chunks retrieved per query.
    pub top_k: usize,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// suitable for a local Ollama setup.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
            },
            llm: LlmConfig {
                ollama_base_url: env::var("OLLAMA_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "nomic-embed-text".to_string()),
                embedding_timeout_secs: env::var("EMBEDDING_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()?,
                generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()?,
            },
            rag: RagConfig {
                chunk_size: env::var("CHUNK_SIZE")
                    .unwrap_or_else(|_| "500".to_string())
                    .parse()?,
                chunk_overlap: env::var("CHUNK_OVERLAP")
                    .unwrap_or_else(|_| "50".to_string())
                    .parse()?,
                top_k: env::var("TOP_K").unwrap_or_else(|_| "5".to_string()).parse()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // No CORPUS-specific variables are set in the test environment.
        let config = Config::from_env().unwrap();
        assert_eq!(config.rag.chunk_size, 500);
        assert_eq!(config.rag.chunk_overlap, 50);
        assert_eq!(config.rag.top_k, 5);
        assert_eq!(config.llm.embedding_model, "nomic-embed-text");
    }
}
