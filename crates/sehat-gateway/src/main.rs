//! SehatBot gateway — entry point.
//!
//! Startup sequence:
//! 1. Parse CLI flags, init logging
//! 2. Load config (file + env vars)
//! 3. Open the chat-history store (SQLite, or memory when unconfigured)
//! 4. Build the query router from the provider config
//! 5. Serve until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use sehat_core::load_config;
use sehat_gateway::{build_router, AppState};
use sehat_providers::{HealthContextClient, QueryRouter};
use sehat_storage::Store;

/// SehatBot — rural health assistant gateway
#[derive(Parser)]
#[command(name = "sehat-gateway", version, about, long_about = None)]
struct Cli {
    /// Listen address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Config file path (default: ~/.sehatbot/config.json)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let mut config = load_config(cli.config.as_deref());
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    let store = if config.database.is_configured() {
        match Store::sqlite(&config.database.url).await {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Failed to open database, chat history kept in memory");
                Store::memory()
            }
        }
    } else {
        info!("No database configured, chat history kept in memory");
        Store::memory()
    };

    let router = QueryRouter::new(config.providers.clone()).with_health_context(
        HealthContextClient::new(config.health_api.api_base.as_deref()),
    );
    let state = AppState {
        router: Arc::new(router),
        store: Arc::new(store),
    };

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("SehatBot gateway listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("sehat=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
