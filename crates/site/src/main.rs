//! Data Insights Hub site binary
//!
//! - `site serve` runs the HTTP server
//! - `site export` writes the site as static files

use anyhow::Context;
use clap::{Parser, Subcommand};
use datahub_common::{
    catalog::validate_catalog,
    config::{AppConfig, ObservabilityConfig},
    errors::AppError,
    metrics::{self, LATENCY_BUCKETS},
};
use datahub_site::{create_router, export, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site", version, about = "Data Insights Hub site")]
struct Cli {
    /// Configuration file (defaults to config/default + APP__ environment)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the catalog over HTTP (default)
    Serve,
    /// Render every page to a static directory
    Export {
        /// Output directory (defaults to `site.export_dir`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    init_tracing(&config.observability);
    info!("Starting Data Insights Hub site v{}", datahub_common::VERSION);

    let state = AppState::new(config);
    validate_catalog(state.catalog.as_slice())
        .map_err(|issues| AppError::InvalidCatalog { issues })?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state).await,
        Command::Export { out } => {
            let out = out.unwrap_or_else(|| state.config.site.export_dir.clone());
            export::export_site(&state.config, state.catalog, &out).await?;
            Ok(())
        }
    }
}

fn init_tracing(observability: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if observability.json_logging {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

async fn serve(state: AppState) -> anyhow::Result<()> {
    let config = state.config.clone();

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets(LATENCY_BUCKETS)?
            .install()
            .context("Failed to install Prometheus exporter")?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
