//! Static coin catalog for the coin register tool.
//!
//! One list per network, embedded at build time and parsed once at startup.
//! Catalogs are immutable after loading and shared by handle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::network::{Network, NetworkName};

const MAINNET_CATALOG_JSON: &str = include_str!("../data/mainnet_coins.json");
const DEVNET_CATALOG_JSON: &str = include_str!("../data/devnet_coins.json");

/// Type tag of the `CoinStore` resource for a coin type.
#[must_use]
pub fn coin_store_type(coin_type: &str) -> String {
    format!("0x1::coin::CoinStore<{coin_type}>")
}

/// A well-known coin that can be registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinCatalogEntry {
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Fully-qualified coin type, e.g. `0x1::aptos_coin::AptosCoin`.
    pub address: String,
}

impl CoinCatalogEntry {
    /// Type tag of this coin's `CoinStore` resource.
    #[must_use]
    pub fn coin_store_type(&self) -> String {
        coin_store_type(&self.address)
    }

    /// Case-insensitive substring match on symbol or name.
    ///
    /// An empty search matches every entry.
    #[must_use]
    pub fn matches(&self, search: &str) -> bool {
        if search.is_empty() {
            return true;
        }
        let needle = search.to_lowercase();
        self.symbol.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

/// The coin list for one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinCatalog {
    entries: Vec<CoinCatalogEntry>,
}

impl CoinCatalog {
    /// Build a catalog from entries.
    #[must_use]
    pub fn new(entries: Vec<CoinCatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or an entry has an empty address.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CoinCatalogEntry> = serde_json::from_str(json)?;

        if let Some(entry) = entries.iter().find(|e| e.address.trim().is_empty()) {
            return Err(CoreError::invalid_catalog(format!(
                "entry {} has an empty address",
                entry.symbol
            )));
        }

        debug!(entries = entries.len(), "coin catalog parsed");
        Ok(Self { entries })
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CoinCatalogEntry] {
        &self.entries
    }

    /// Entries matching `search`, in catalog order.
    #[must_use]
    pub fn filter(&self, search: &str) -> Vec<&CoinCatalogEntry> {
        self.entries.iter().filter(|e| e.matches(search)).collect()
    }

    /// Look up an entry by coin type.
    #[must_use]
    pub fn find_by_address(&self, address: &str) -> Option<&CoinCatalogEntry> {
        self.entries.iter().find(|e| e.address == address)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalogs for every supported network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinCatalogs {
    mainnet: CoinCatalog,
    devnet: CoinCatalog,
}

impl CoinCatalogs {
    /// Build from explicit per-network catalogs.
    #[must_use]
    pub fn new(mainnet: CoinCatalog, devnet: CoinCatalog) -> Self {
        Self { mainnet, devnet }
    }

    /// Load the catalogs embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns error if the embedded JSON is invalid.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            mainnet: CoinCatalog::from_json(MAINNET_CATALOG_JSON)?,
            devnet: CoinCatalog::from_json(DEVNET_CATALOG_JSON)?,
        })
    }

    /// Catalog for a known network.
    #[must_use]
    pub fn get(&self, network: Network) -> &CoinCatalog {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Devnet => &self.devnet,
        }
    }

    /// Catalog for a wallet-reported network: mainnet gets the mainnet list,
    /// every other name gets the devnet list.
    #[must_use]
    pub fn for_network(&self, name: &NetworkName) -> &CoinCatalog {
        match name {
            NetworkName::Mainnet => &self.mainnet,
            _ => &self.devnet,
        }
    }
}
