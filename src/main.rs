use anyhow::{Context, Result};
use resume_builder::{core::ConfigManager, start_web_server};
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    let log_path = std::env::var("FLOWCV_LOG_FILE").unwrap_or_else(|_| "/tmp/flowcv.log".to_string());
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(fmt::layer().compact())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resume_builder=info,flowcv=info,rocket::server=warn")),
        )
        .init();

    let port = match std::env::var("ROCKET_PORT") {
        Ok(value) => value
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
        Err(_) => DEFAULT_PORT,
    };

    // Load configuration using unified ConfigManager
    let config = ConfigManager::load()?;
    config.ensure_directories().await?;

    info!("Environment: {}", config.environment.name);
    info!("Data: {}", config.environment.data_path.display());
    info!("PDF converter: {}", config.converter.program);
    info!("Server: http://0.0.0.0:{}", port);

    start_web_server(config, port).await
}
