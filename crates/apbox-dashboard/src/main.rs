//! ApBox API server binary.

use anyhow::Context;
use apbox_dashboard::cli::{Cli, LogFormat};
use apbox_dashboard::DashboardServer;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    let config = cli.to_config();
    let bind_addr = config.bind_addr;
    if config.compile_api.is_none() {
        warn!("COMPILE_API is not set; /api/compile will answer 503");
    }

    let server = DashboardServer::new(config).context("invalid configuration")?;

    info!("Starting ApBox API on {}", bind_addr);
    server
        .serve_with_shutdown(bind_addr, shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
