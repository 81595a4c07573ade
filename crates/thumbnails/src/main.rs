//! Data Insights Hub thumbnail tools
//!
//! Offline batch jobs that prepare card thumbnails:
//! 1. `generate` captures a screenshot of every project URL as `{id}.png`
//! 2. `optimize` shrinks those PNGs and re-encodes them for the site
//!
//! Both run sequentially and finish the batch even when items fail.

mod capture;
mod errors;
mod optimize;
mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use datahub_common::{
    config::{AppConfig, ObservabilityConfig},
    metrics, PROJECTS, VERSION,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::capture::{CaptureTarget, HttpScreenshotter};
use crate::optimize::OptimizeSettings;

#[derive(Parser)]
#[command(name = "thumbnails", version, about = "Generate and optimize project thumbnails")]
struct Cli {
    /// Configuration file (defaults to config/default + APP__ environment)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Capture screenshots of every project
    Generate,
    /// Resize and re-encode captured screenshots
    Optimize,
    /// Generate, then optimize
    All,
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
    info!("Starting Data Insights Hub thumbnail tools v{}", VERSION);
    metrics::register_metrics();

    let thumbnails = &config.thumbnails;
    // Fail on a bad extension before spending time on captures
    let settings = OptimizeSettings::from_config(thumbnails)?;

    if matches!(cli.command, Command::Generate | Command::All) {
        let shooter = HttpScreenshotter::new(thumbnails.clone())?;
        let targets: Vec<CaptureTarget> = PROJECTS.iter().map(CaptureTarget::from).collect();
        info!(
            targets = targets.len(),
            dir = %thumbnails.dir.display(),
            "Generating screenshots"
        );
        capture::generate(&shooter, &targets, &thumbnails.dir, thumbnails.capture_timeout())
            .await?;
    }

    if matches!(cli.command, Command::Optimize | Command::All) {
        info!(dir = %thumbnails.dir.display(), "Optimizing screenshots");
        optimize::optimize_dir(&thumbnails.dir, &settings).await?;
    }

    Ok(())
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
