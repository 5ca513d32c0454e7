mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LlmBackend};
use crate::generation::client::{GenerationClient, MarkerClassifier};
use crate::llm_client::mock::CannedGenerator;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing credential)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM backend
    let backend = build_backend(&config)?;

    let mut generator = GenerationClient::new(backend, config.retry);
    if let Some(markers) = &config.rate_limit_markers {
        info!("Rate-limit markers: {}", markers.join(", "));
        generator = generator.with_classifier(Arc::new(MarkerClassifier::new(markers)));
    }
    info!(
        "Generation client initialized (max_attempts: {}, retry delay: {}s, backoff: {:?})",
        config.retry.max_attempts,
        config.retry.delay.as_secs(),
        config.retry.backoff
    );

    let state = AppState {
        generator,
        document_call_delay: config.document_call_delay,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the form UI is served from a different origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the remote generation capability selected by `LLM_BACKEND`.
fn build_backend(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    match config.llm_backend {
        LlmBackend::Mock => {
            info!("LLM backend: canned offline responses");
            Ok(Arc::new(CannedGenerator))
        }
        LlmBackend::Gemini => {
            let api_key = config
                .gemini_api_key
                .clone()
                .context("GEMINI_API_KEY is required for the gemini backend")?;
            let client = LlmClient::new(api_key, config.gemini_model.clone(), config.llm_timeout)
                .context("Failed to build HTTP client")?
                .with_api_base(config.gemini_api_base.as_str());
            info!("LLM client initialized (model: {})", client.model());
            Ok(Arc::new(client))
        }
    }
}
