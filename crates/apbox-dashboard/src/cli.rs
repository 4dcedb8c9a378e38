//! Command-line argument parsing with clap.

use std::net::SocketAddr;
use std::time::Duration;

use apbox_core::Network;
use clap::{Parser, ValueEnum};

use crate::config::DashboardConfig;

/// ApBox API server: compile proxy, coin catalog and sale history.
#[derive(Parser, Debug, Clone)]
#[command(name = "apbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "APBOX_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Upstream compile service for `POST /api/compile`.
    #[arg(long, env = "COMPILE_API")]
    pub compile_api: Option<String>,

    /// Timeout for upstream and fullnode requests, in seconds.
    #[arg(long, env = "APBOX_UPSTREAM_TIMEOUT_SECS", default_value_t = 60)]
    pub upstream_timeout_secs: u64,

    /// Allowed CORS origin; repeat for several. Empty allows any.
    #[arg(long = "cors-origin", env = "APBOX_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Mainnet fullnode REST endpoint.
    #[arg(long, env = "APBOX_MAINNET_NODE_URL", default_value = Network::Mainnet.default_node_url())]
    pub mainnet_node_url: String,

    /// Devnet fullnode REST endpoint.
    #[arg(long, env = "APBOX_DEVNET_NODE_URL", default_value = Network::Devnet.default_node_url())]
    pub devnet_node_url: String,

    /// Log output format.
    #[arg(long, value_enum, env = "APBOX_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl Cli {
    /// Build the server configuration from the parsed arguments.
    #[must_use]
    pub fn to_config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::new(self.bind)
            .with_upstream_timeout(Duration::from_secs(self.upstream_timeout_secs))
            .with_mainnet_node_url(self.mainnet_node_url.clone())
            .with_devnet_node_url(self.devnet_node_url.clone());
        if let Some(url) = self.compile_api.as_deref().filter(|u| !u.is_empty()) {
            config = config.with_compile_api(url);
        }
        for origin in &self.cors_origins {
            config = config.with_cors_origin(origin.clone());
        }
        config
    }
}
