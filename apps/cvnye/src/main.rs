mod cli;
mod config;
mod errors;
mod export;
mod gateway;
mod llm_client;
mod models;
mod render;
mod workflow;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::gateway::{GeminiGateway, ANALYSIS_MODEL, FAST_MODEL};
use crate::llm_client::LlmClient;
use crate::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse arguments before touching the environment so --help works without a key
    let cli = Cli::parse();

    // Load configuration (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging; stdout belongs to the terminal surface
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting CVNyé v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_api_base.clone())
        .context("Failed to build the HTTP client")?;
    info!(
        "LLM client initialized (models: {}, {})",
        FAST_MODEL, ANALYSIS_MODEL
    );

    let gateway = Arc::new(GeminiGateway::new(llm));
    let workflow = Workflow::new(gateway, config.settle_delay);

    cli.run(workflow, &config).await
}
