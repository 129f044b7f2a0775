use anyhow::Result;
use clap::Parser;
use resume_builder::cli::{handle_resume_command, ResumeCli};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,resume_builder=info")))
        .init();

    let cli = ResumeCli::parse();
    handle_resume_command(cli).await
}
