// ABOUTME: Gym Coach API server binary
// ABOUTME: Loads configuration, wires the Gemini gateway, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # Gym Coach Server Binary
//!
//! Starts the HTTP API backing the Gym Coach SPA: workout plan generation,
//! exercise demonstration images, and food photo analysis.

use anyhow::Result;
use clap::Parser;
use gymcoach_server::{
    config::ServerConfig,
    llm::{CoachProvider, GeminiProvider},
    logging,
    resources::ServerResources,
    routes,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "gymcoach-server")]
#[command(about = "Gym Coach AI - workout planning and nutrition analysis backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Gym Coach API server");
    info!("{}", config.summary());

    // Wire the Gemini gateway from configuration
    let mut provider = GeminiProvider::new(config.gemini.api_key.clone());
    if let Some(model) = &config.gemini.text_model {
        provider = provider.with_text_model(model);
    }
    if let Some(model) = &config.gemini.image_model {
        provider = provider.with_image_model(model);
    }
    if let Some(base_url) = &config.gemini.base_url {
        provider = provider.with_base_url(base_url);
    }
    let provider: Arc<dyn CoachProvider> = Arc::new(provider);

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(provider, config));
    let app = routes::router(resources);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gym Coach API server stopped");
    Ok(())
}

/// Resolve when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
