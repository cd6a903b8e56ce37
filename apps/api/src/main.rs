mod config;
mod errors;
mod llm_client;
mod models;
mod remodel;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::remodel::keywords::{
    FallbackKeywordSource, KeywordSource, LlmKeywordSource, VocabularyKeywordSource,
};
use crate::remodel::rebuild::HttpPostingFetcher;
use crate::remodel::scoring::ScoringWeights;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on inconsistent env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Remodel API v{}", env!("CARGO_PKG_VERSION"));

    // Posting fetcher for sourceType=url requests
    let fetcher = Arc::new(HttpPostingFetcher::new());

    // Keyword source: vocabulary fallback always; model-assisted primary only
    // when enabled. The decorator guarantees a usable result either way.
    let fallback: Arc<dyn KeywordSource> = Arc::new(VocabularyKeywordSource::default());
    let primary: Option<Arc<dyn KeywordSource>> = if config.enable_llm_keywords {
        let api_key = config
            .anthropic_api_key
            .clone()
            .context("ANTHROPIC_API_KEY is required when ENABLE_LLM_KEYWORDS is set")?;
        info!("Model-assisted keyword extraction enabled (model: {})", llm_client::MODEL);
        Some(Arc::new(LlmKeywordSource::new(LlmClient::new(api_key))))
    } else {
        info!("Model-assisted keyword extraction disabled; using vocabulary fallback only");
        None
    };
    let keywords: Arc<dyn KeywordSource> = Arc::new(FallbackKeywordSource::new(primary, fallback));

    // Build app state
    let state = AppState {
        config: config.clone(),
        fetcher,
        keywords,
        weights: ScoringWeights::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
