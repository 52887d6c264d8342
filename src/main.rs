use anyhow::{Context, Result};
use clap::Parser;
use job_profile::cli::{handle_command, Cli};
use job_profile::config::AppConfig;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    // Logs go to a JSON file so stdout stays clean for command output
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("Failed to open log file: {}", config.log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Environment: {}", AppConfig::get_environment());
    info!("Backend: {}", config.api_url);
    info!("Request timeout: {}s", config.timeout_seconds);

    handle_command(cli, config).await
}
