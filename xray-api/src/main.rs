//! xray-api - Portfolio X-Ray Pro API server
//!
//! Serves upload, transparency score, provenance and PDF report endpoints.
//! Configuration: see `xray_common::config` for file resolution; `--host` and
//! `--port` (or `XRAY_HOST` / `XRAY_PORT`) override the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};
use xray_api::{build_router, AppState};
use xray_common::config::load_config;

/// Command-line arguments for xray-api
#[derive(Parser, Debug)]
#[command(name = "xray-api")]
#[command(about = "Portfolio X-Ray Pro API server")]
#[command(version)]
struct Args {
    /// Path to TOML config file (default: $XRAY_CONFIG, then platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind to
    #[arg(long, env = "XRAY_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "XRAY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise start at info until the config file is read
    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    // Log build identification IMMEDIATELY after tracing init
    info!(
        "Starting Portfolio X-Ray Pro API (xray-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;

    if std::env::var_os("RUST_LOG").is_none() {
        match EnvFilter::try_new(&config.logging.level) {
            Ok(level) => filter_handle
                .reload(level)
                .context("Failed to apply configured log level")?,
            Err(e) => warn!(
                "Invalid logging.level {:?} ({}), keeping info",
                config.logging.level, e
            ),
        }
    }

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("CORS origins: {}", config.cors_origins.join(", "));
    if config.report.use_computed_score {
        info!("PDF reports print the computed transparency score");
    }

    let addr = config.bind_addr();
    let state = AppState::in_memory(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("xray-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
