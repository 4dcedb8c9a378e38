//! Response types for the dashboard API.

use apbox_core::{CoinCatalogEntry, Network, SaleRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status message.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Whether a compile service is configured.
    pub compile_configured: bool,
}

/// Query parameters for catalog search.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring of symbol or name.
    pub search: Option<String>,
}

/// Catalog entries for one network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// Network the catalog belongs to.
    pub network: Network,
    /// Matching coins, in catalog order.
    pub coins: Vec<CoinCatalogEntry>,
}

/// Latest marketplace sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesResponse {
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Display rows in node order.
    pub sales: Vec<SaleRow>,
}
