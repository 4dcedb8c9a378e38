//! Aptos network naming.
//!
//! Wallet adapters report the network they are pointed at as a free-form
//! name. Only mainnet and devnet have a node client and a coin catalog; any
//! other name is carried through as [`NetworkName::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aptos network with a known fullnode endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network.
    Mainnet,
    /// Developer network (reset periodically).
    Devnet,
}

impl Network {
    /// Default fullnode REST endpoint for this network.
    #[must_use]
    pub const fn default_node_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1",
            Self::Devnet => "https://fullnode.devnet.aptoslabs.com/v1",
        }
    }

    /// Parse a lowercase path or config value (`mainnet` / `devnet`).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "mainnet" => Some(Self::Mainnet),
            "devnet" => Some(Self::Devnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "Mainnet"),
            Self::Devnet => write!(f, "Devnet"),
        }
    }
}

/// Network name as reported by a wallet adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NetworkName {
    /// Aptos mainnet.
    Mainnet,
    /// Aptos devnet.
    Devnet,
    /// Any other network (testnet, localnet, custom).
    Other(String),
}

impl NetworkName {
    /// Interpret a wallet-reported name. Matching is case-insensitive.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("mainnet") {
            Self::Mainnet
        } else if name.eq_ignore_ascii_case("devnet") {
            Self::Devnet
        } else {
            Self::Other(name.to_string())
        }
    }

    /// The known network this name refers to, if any.
    #[must_use]
    pub fn network(&self) -> Option<Network> {
        match self {
            Self::Mainnet => Some(Network::Mainnet),
            Self::Devnet => Some(Network::Devnet),
            Self::Other(_) => None,
        }
    }

    /// Display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Devnet => "Devnet",
            Self::Other(name) => name,
        }
    }
}

impl From<Network> for NetworkName {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::Mainnet,
            Network::Devnet => Self::Devnet,
        }
    }
}

impl From<String> for NetworkName {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<NetworkName> for String {
    fn from(name: NetworkName) -> Self {
        match name {
            NetworkName::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
