mod catalog;
mod cli;
mod config;
mod errors;
mod llm_client;
mod models;
mod recommendation;
mod routes;
mod state;

#[cfg(test)]
mod test_utils;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::RetrievalContext;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on a missing API key or malformed numbers)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recommender v{}", env!("CARGO_PKG_VERSION"));

    let llm = Arc::new(LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        config.embedding_model.clone(),
        config.generation_model.clone(),
        config.http_timeout,
    )?);
    info!(
        "LLM client initialized (embedding: {}, generation: {})",
        llm.embedding_model(),
        llm.generation_model()
    );

    match cli.command() {
        Command::EmbedCatalog { output } => {
            let output: PathBuf = output.clone().unwrap_or_else(|| config.embeddings_path.clone());
            catalog::embed_job::run(
                &config.catalog_path,
                &output,
                llm.as_ref(),
                RetryPolicy::new(config.embed_max_attempts, config.embed_retry_delay),
                Some(llm.embedding_model().to_string()),
            )
            .await
        }
        Command::Serve => serve(config, llm).await,
    }
}

async fn serve(config: Config, llm: Arc<LlmClient>) -> Result<()> {
    // Static artifacts must load and agree before the listener binds
    let retrieval = RetrievalContext::load(&config.catalog_path, &config.embeddings_path)
        .context("Failed to load catalog and embeddings")?;

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let state = AppState {
        retrieval: Arc::new(retrieval),
        embedder: llm.clone(),
        generator: llm,
        http,
        config: config.clone(),
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
