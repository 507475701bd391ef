mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::store::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Crafter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(LlmSettings::from_config(&config))?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s, retries: {})",
        llm_client::MODEL,
        config.llm_timeout_secs,
        config.llm_max_retries
    );

    let sessions = SessionStore::new(Duration::from_secs(config.session_idle_ttl_secs));
    sessions.spawn_sweeper(Duration::from_secs(config.session_sweep_secs));
    info!(
        "Session store ready (idle ttl: {}s, sweep every {}s)",
        config.session_idle_ttl_secs, config.session_sweep_secs
    );

    let state = AppState {
        sessions,
        generator: Arc::new(llm),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
