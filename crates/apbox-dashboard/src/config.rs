//! Dashboard server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use apbox_core::Network;

use crate::error::{DashboardError, DashboardResult};

/// Configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Upstream compile service that `POST /api/compile` forwards to.
    pub compile_api: Option<String>,
    /// Timeout for upstream and fullnode requests.
    pub upstream_timeout: Duration,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
    /// Mainnet fullnode REST endpoint.
    pub mainnet_node_url: String,
    /// Devnet fullnode REST endpoint.
    pub devnet_node_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            compile_api: None,
            upstream_timeout: Duration::from_secs(60),
            cors_origins: Vec::new(),
            mainnet_node_url: Network::Mainnet.default_node_url().to_string(),
            devnet_node_url: Network::Devnet.default_node_url().to_string(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Set the upstream compile service URL.
    #[must_use]
    pub fn with_compile_api(mut self, url: impl Into<String>) -> Self {
        self.compile_api = Some(url.into());
        self
    }

    /// Set the upstream request timeout.
    #[must_use]
    pub const fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }

    /// Override the mainnet fullnode endpoint.
    #[must_use]
    pub fn with_mainnet_node_url(mut self, url: impl Into<String>) -> Self {
        self.mainnet_node_url = url.into();
        self
    }

    /// Override the devnet fullnode endpoint.
    #[must_use]
    pub fn with_devnet_node_url(mut self, url: impl Into<String>) -> Self {
        self.devnet_node_url = url.into();
        self
    }

    /// Check that every configured URL parses.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] naming the first bad URL.
    pub fn validate(&self) -> DashboardResult<()> {
        let urls = self
            .compile_api
            .iter()
            .map(|url| ("compile API", url))
            .chain([
                ("mainnet node", &self.mainnet_node_url),
                ("devnet node", &self.devnet_node_url),
            ]);
        for (what, url) in urls {
            reqwest::Url::parse(url)
                .map_err(|e| DashboardError::Config(format!("{what} URL {url:?}: {e}")))?;
        }
        if self.upstream_timeout.is_zero() {
            return Err(DashboardError::Config(
                "upstream timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
