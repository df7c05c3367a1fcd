mod config;
mod document;
mod errors;
mod form;
mod llm_client;
mod release;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::HttpTemplateFetcher;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing OPENAI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pressroom v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone())?
        .with_endpoint(config.openai_api_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    if !config.reference_hint {
        info!("Reference-release directive disabled");
    }

    // Initialize template fetcher
    let templates = HttpTemplateFetcher::new(config.template_base_url.clone());
    if config.export_enabled {
        info!(
            "Word export enabled (template: {})",
            templates.template_url(&config.template_repository, &config.template_path)
        );
    } else {
        info!("Word export disabled");
    }

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        templates: Arc::new(templates),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
