mod analysis;
mod candidates;
mod config;
mod errors;
mod llm_client;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use chrono::Utc;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::candidates::seed::seed_candidates;
use crate::candidates::CandidateStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::{LlmScorer, PdfTextExtractor, ScreeningWorkflow, WorkflowTimeouts};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireSync API v{}", env!("CARGO_PKG_VERSION"));

    // Candidate store, optionally primed with the example candidates
    let store = if config.seed_candidates {
        let seeded = CandidateStore::from_records(seed_candidates(Utc::now()))?;
        info!("Candidate store seeded with {} records", seeded.len().await);
        seeded
    } else {
        CandidateStore::new()
    };
    let store = Arc::new(store);

    // Initialize LLM client (bounded per-request timeout; the workflow applies its own on top)
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
        config.scoring_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let workflow = Arc::new(ScreeningWorkflow::new(
        Arc::new(PdfTextExtractor),
        Arc::new(LlmScorer::new(llm)),
        Arc::clone(&store),
        WorkflowTimeouts {
            extraction: config.extraction_timeout,
            scoring: config.scoring_timeout,
        },
    ));

    // Build app state
    let state = AppState {
        config: config.clone(),
        store,
        workflow,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the dashboard origin once it has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
