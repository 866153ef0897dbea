use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corpus::{
    AppState, Config, EmbeddingClient, LLMClient,
    api::routes::create_router,
    llm::OllamaClient,
    rag::cache::CachedEmbedder,
};
use corpus_vector::VectorIndex;

/// Upper bound on memoized query/chunk embeddings.
const EMBEDDING_CACHE_ENTRIES: usize = 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corpus=info,corpus_vector=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config =
        Arc::new(Config::from_env().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?);

    let embedder = OllamaClient::new(
        &config.llm.ollama_base_url,
        config.llm.embedding_model.clone(),
        Duration::from_secs(config.llm.embedding_timeout_secs),
    );
    let embedder: Arc<dyn EmbeddingClient> =
        Arc::new(CachedEmbedder::new(Arc::new(embedder), EMBEDDING_CACHE_ENTRIES));

    let llm: Arc<dyn LLMClient> = Arc::new(OllamaClient::new(
        &config.llm.ollama_base_url,
        config.llm.model.clone(),
        Duration::from_secs(config.llm.generation_timeout_secs),
    ));

    let state = AppState {
        index: Arc::new(VectorIndex::new()),
        embedder,
        llm,
        config: config.clone(),
    };

    let app = create_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        %addr,
        model = %config.llm.model,
        embedding_model = %config.llm.embedding_model,
        chunk_size = config.rag.chunk_size,
        "Starting corpus-server"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
