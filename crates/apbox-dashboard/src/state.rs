//! Shared state for the dashboard server.

use std::sync::Arc;
use std::time::Instant;

use apbox_client::{AptosNodeClient, NodeClients};
use apbox_core::CoinCatalogs;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};

/// Shared state for the dashboard server.
///
/// Node clients and catalogs are built once here and handed to handlers by
/// reference.
#[derive(Debug)]
pub struct DashboardState {
    /// Dashboard configuration.
    config: Arc<DashboardConfig>,
    /// HTTP client used for upstream compile requests.
    http: reqwest::Client,
    /// One fullnode client per network.
    nodes: Arc<NodeClients<AptosNodeClient>>,
    /// Coin catalogs per network.
    catalogs: Arc<CoinCatalogs>,
    /// Server start time.
    start_time: Instant,
}

impl DashboardState {
    /// Create state from configuration, using the built-in coin catalogs.
    ///
    /// # Errors
    ///
    /// Returns error if a configured URL is invalid or the catalogs fail to load.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let catalogs =
            CoinCatalogs::builtin().map_err(|e| DashboardError::Config(e.to_string()))?;
        Self::with_catalogs(config, Arc::new(catalogs))
    }

    /// Create state with explicit catalogs.
    ///
    /// # Errors
    ///
    /// Returns error if a configured URL is invalid.
    pub fn with_catalogs(config: DashboardConfig, catalogs: Arc<CoinCatalogs>) -> DashboardResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| DashboardError::Config(e.to_string()))?;
        let node = |url: &str| {
            AptosNodeClient::with_http_client(url, http.clone())
                .map_err(|e| DashboardError::Config(e.to_string()))
        };
        let nodes = NodeClients::new(node(&config.mainnet_node_url)?, node(&config.devnet_node_url)?);

        Ok(Self {
            config: Arc::new(config),
            http,
            nodes: Arc::new(nodes),
            catalogs,
            start_time: Instant::now(),
        })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// HTTP client for upstream requests.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fullnode clients.
    #[must_use]
    pub fn nodes(&self) -> &NodeClients<AptosNodeClient> {
        &self.nodes
    }

    /// Coin catalogs.
    #[must_use]
    pub fn catalogs(&self) -> &CoinCatalogs {
        &self.catalogs
    }

    /// Get server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
