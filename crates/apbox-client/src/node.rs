//! Aptos fullnode REST client.
//!
//! [`NodeClient`] covers the two queries ApBox needs: the resources held by
//! an account and a page of events from an event handle. [`AptosNodeClient`]
//! speaks the fullnode REST API; [`NodeClients`] holds one client per
//! supported network and is built once at startup.

use apbox_core::{MoveEvent, MoveResource, Network, NetworkName};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

/// Default per-request timeout for fullnode queries.
pub const DEFAULT_NODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Read access to an Aptos fullnode.
#[allow(async_fn_in_trait)]
pub trait NodeClient {
    /// All resources stored under `address`.
    async fn account_resources(&self, address: &str) -> Result<Vec<MoveResource>>;

    /// Up to `limit` events from the handle `struct_tag.field_name` owned by `owner`.
    async fn events_by_event_handle(
        &self,
        owner: &str,
        struct_tag: &str,
        field_name: &str,
        limit: u16,
    ) -> Result<Vec<MoveEvent>>;
}

/// HTTP client for a single fullnode endpoint.
#[derive(Clone)]
pub struct AptosNodeClient {
    base_url: Url,
    http: reqwest::Client,
}

impl AptosNodeClient {
    /// Create a client for `base_url` (e.g. `https://fullnode.devnet.aptoslabs.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http_client(base_url, http)
    }

    /// Create a client that shares an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or cannot carry path segments.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|e| ClientError::invalid_url(base_url, e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::invalid_url(base_url, "not a base URL"));
        }
        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    /// Create a client for a network's public fullnode.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn for_network(network: Network, timeout: Duration) -> Result<Self> {
        Self::new(network.default_node_url(), timeout)
    }

    /// The endpoint this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::invalid_url(self.base_url.as_str(), "not a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "querying fullnode");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Node {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

impl fmt::Debug for AptosNodeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AptosNodeClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl NodeClient for AptosNodeClient {
    async fn account_resources(&self, address: &str) -> Result<Vec<MoveResource>> {
        let url = self.endpoint(["accounts", address, "resources"])?;
        let resources: Vec<MoveResource> = self.get_json(url).await?;
        debug!(address, count = resources.len(), "fetched account resources");
        Ok(resources)
    }

    async fn events_by_event_handle(
        &self,
        owner: &str,
        struct_tag: &str,
        field_name: &str,
        limit: u16,
    ) -> Result<Vec<MoveEvent>> {
        let mut url = self.endpoint(["accounts", owner, "events", struct_tag, field_name])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }
}

/// One node client per supported network.
#[derive(Debug, Clone)]
pub struct NodeClients<C> {
    mainnet: C,
    devnet: C,
}

impl<C> NodeClients<C> {
    /// Group a mainnet and a devnet client.
    #[must_use]
    pub const fn new(mainnet: C, devnet: C) -> Self {
        Self { mainnet, devnet }
    }

    /// Client for a known network.
    #[must_use]
    pub const fn get(&self, network: Network) -> &C {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Devnet => &self.devnet,
        }
    }

    /// Client for a wallet-reported network; `None` for networks without one.
    #[must_use]
    pub fn for_network(&self, name: &NetworkName) -> Option<&C> {
        name.network().map(|network| self.get(network))
    }

    /// The mainnet client.
    #[must_use]
    pub const fn mainnet(&self) -> &C {
        &self.mainnet
    }

    /// The devnet client.
    #[must_use]
    pub const fn devnet(&self) -> &C {
        &self.devnet
    }
}

impl NodeClients<AptosNodeClient> {
    /// Clients for explicit endpoints sharing one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if either URL is invalid or the HTTP client cannot be built.
    pub fn from_urls(mainnet: &str, devnet: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(
            AptosNodeClient::with_http_client(mainnet, http.clone())?,
            AptosNodeClient::with_http_client(devnet, http)?,
        ))
    }

    /// Clients for the public Aptos fullnodes.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn aptos_defaults() -> Result<Self> {
        Self::from_urls(
            Network::Mainnet.default_node_url(),
            Network::Devnet.default_node_url(),
            DEFAULT_NODE_TIMEOUT,
        )
    }
}

#[derive(Debug, Default)]
struct FakeNodeState {
    resources: HashMap<String, Vec<MoveResource>>,
    events: HashMap<String, Vec<MoveEvent>>,
    failing: HashSet<String>,
    gates: HashMap<String, Arc<Notify>>,
    requests: usize,
}

/// In-memory node client for tests.
///
/// Unknown accounts have no resources. An address can be made to fail, or
/// be held until the test releases it via [`FakeNodeClient::hold`].
#[derive(Debug, Clone, Default)]
pub struct FakeNodeClient {
    state: Arc<Mutex<FakeNodeState>>,
}

impl FakeNodeClient {
    /// Create an empty fake node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resources returned for `address`.
    pub fn set_resources(&self, address: impl Into<String>, resources: Vec<MoveResource>) {
        self.state.lock().resources.insert(address.into(), resources);
    }

    /// Set the events returned for an event handle.
    pub fn set_events(&self, owner: &str, struct_tag: &str, field_name: &str, events: Vec<MoveEvent>) {
        self.state
            .lock()
            .events
            .insert(handle_key(owner, struct_tag, field_name), events);
    }

    /// Make queries for `address` fail (or succeed again).
    pub fn set_failing(&self, address: &str, failing: bool) {
        let mut state = self.state.lock();
        if failing {
            state.failing.insert(address.to_string());
        } else {
            state.failing.remove(address);
        }
    }

    /// Hold the next resource query for `address` until the returned
    /// notifier is signalled.
    pub fn hold(&self, address: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .gates
            .insert(address.to_string(), Arc::clone(&gate));
        gate
    }

    /// Number of queries received.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.state.lock().requests
    }
}

fn handle_key(owner: &str, struct_tag: &str, field_name: &str) -> String {
    format!("{owner}/{struct_tag}/{field_name}")
}

impl NodeClient for FakeNodeClient {
    async fn account_resources(&self, address: &str) -> Result<Vec<MoveResource>> {
        let gate = {
            let mut state = self.state.lock();
            state.requests += 1;
            state.gates.remove(address)
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = self.state.lock();
        if state.failing.contains(address) {
            return Err(ClientError::Node {
                status: 503,
                message: "fullnode unavailable".to_string(),
            });
        }
        Ok(state.resources.get(address).cloned().unwrap_or_default())
    }

    async fn events_by_event_handle(
        &self,
        owner: &str,
        struct_tag: &str,
        field_name: &str,
        limit: u16,
    ) -> Result<Vec<MoveEvent>> {
        let mut state = self.state.lock();
        state.requests += 1;
        if state.failing.contains(owner) {
            return Err(ClientError::Node {
                status: 503,
                message: "fullnode unavailable".to_string(),
            });
        }
        Ok(state
            .events
            .get(&handle_key(owner, struct_tag, field_name))
            .map(|events| events.iter().take(usize::from(limit)).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_encodes_struct_tag() {
        let client = AptosNodeClient::new("https://node.example/v1", DEFAULT_NODE_TIMEOUT)
            .expect("should build client");
        let url = client
            .endpoint(["accounts", "0x1", "events", "0x1::m::Events<0x2::c::C>", "buy_events"])
            .expect("should build url");

        assert_eq!(
            url.as_str(),
            "https://node.example/v1/accounts/0x1/events/0x1::m::Events%3C0x2::c::C%3E/buy_events"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = AptosNodeClient::new("https://node.example/v1/", DEFAULT_NODE_TIMEOUT)
            .expect("should build client");
        let url = client
            .endpoint(["accounts", "0xa", "resources"])
            .expect("should build url");
        assert_eq!(url.as_str(), "https://node.example/v1/accounts/0xa/resources");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = AptosNodeClient::new("not a url", DEFAULT_NODE_TIMEOUT).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));

        let err = AptosNodeClient::new("mailto:someone@example.com", DEFAULT_NODE_TIMEOUT)
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[test]
    fn test_clients_selected_by_network_name() {
        let clients = NodeClients::new("main", "dev");
        assert_eq!(clients.for_network(&NetworkName::Mainnet), Some(&"main"));
        assert_eq!(clients.for_network(&NetworkName::Devnet), Some(&"dev"));
        assert_eq!(clients.for_network(&NetworkName::parse("testnet")), None);
    }

    #[test]
    fn test_default_clients_use_public_fullnodes() {
        let clients = NodeClients::aptos_defaults().expect("should build clients");
        assert!(clients.mainnet().base_url().as_str().contains("mainnet"));
        assert!(clients.devnet().base_url().as_str().contains("devnet"));
    }

    #[tokio::test]
    async fn test_fake_resources_and_failure() {
        let node = FakeNodeClient::new();
        node.set_resources("0xa", vec![MoveResource::new("0x1::account::Account", json!({}))]);

        assert_eq!(node.account_resources("0xa").await.expect("should fetch").len(), 1);
        assert!(node.account_resources("0xb").await.expect("should fetch").is_empty());

        node.set_failing("0xa", true);
        assert!(node.account_resources("0xa").await.is_err());
        assert_eq!(node.requests(), 3);
    }

    #[tokio::test]
    async fn test_fake_events_respect_limit() {
        let node = FakeNodeClient::new();
        let events = (0..5)
            .map(|i| MoveEvent {
                version: i,
                sequence_number: i,
                event_type: "0x1::e::E".to_string(),
                data: json!({}),
            })
            .collect();
        node.set_events("0x1", "0x1::e::Events", "items", events);

        let page = node
            .events_by_event_handle("0x1", "0x1::e::Events", "items", 3)
            .await
            .expect("should fetch");
        assert_eq!(page.len(), 3);
    }
}
