//! Coin register panel.

use apbox_core::{coin_store_type, register_payload, CoinCatalogEntry, CoinCatalogs};
use apbox_core::{PendingTransaction, TransactionOptions};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::{ClientError, Result};
use crate::node::NodeClient;
use crate::session::{SessionController, SessionSnapshot};
use crate::wallet::WalletAdapter;

/// Whether the connected account holds a coin's `CoinStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// `CoinStore<coin>` exists.
    Registered,
    /// Resources are known and the store is missing.
    Unregistered,
    /// Resources have not been fetched.
    Unknown,
}

/// A catalog entry with its registration status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinListing {
    /// Catalog data.
    pub entry: CoinCatalogEntry,
    /// Status for the connected account.
    pub status: RegistrationStatus,
}

impl CoinListing {
    /// Whether the Register action should be offered.
    #[must_use]
    pub fn can_register(&self) -> bool {
        self.status == RegistrationStatus::Unregistered
    }
}

/// Lists catalog coins and registers their `CoinStore`.
#[derive(Debug, Clone)]
pub struct CoinRegisterPanel {
    catalogs: Arc<CoinCatalogs>,
    search: String,
    custom_address: String,
}

impl CoinRegisterPanel {
    /// Create a panel over the shared catalogs.
    #[must_use]
    pub fn new(catalogs: Arc<CoinCatalogs>) -> Self {
        Self {
            catalogs,
            search: String::new(),
            custom_address: String::new(),
        }
    }

    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Update the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Current custom address text.
    #[must_use]
    pub fn custom_address(&self) -> &str {
        &self.custom_address
    }

    /// Update the custom address text.
    pub fn set_custom_address(&mut self, address: impl Into<String>) {
        self.custom_address = address.into();
    }

    /// Banner describing the connection.
    #[must_use]
    pub fn connection_label(snapshot: &SessionSnapshot) -> String {
        match snapshot.network() {
            Some(network) => format!("You are connected to {network}"),
            None => "You are connected to nothing.".to_string(),
        }
    }

    /// Registration status of `coin_type` given the snapshot's resources.
    #[must_use]
    pub fn status(snapshot: &SessionSnapshot, coin_type: &str) -> RegistrationStatus {
        match &snapshot.resources {
            Some(set) if set.contains_type(&coin_store_type(coin_type)) => {
                RegistrationStatus::Registered
            }
            Some(_) => RegistrationStatus::Unregistered,
            None => RegistrationStatus::Unknown,
        }
    }

    /// Catalog entries matching the search, for the session's network.
    ///
    /// Mainnet sessions see the mainnet catalog, every other network the
    /// devnet catalog. Without a session the list is empty.
    #[must_use]
    pub fn listings(&self, snapshot: &SessionSnapshot) -> Vec<CoinListing> {
        let Some(network) = snapshot.network() else {
            return Vec::new();
        };

        self.catalogs
            .for_network(network)
            .filter(&self.search)
            .into_iter()
            .map(|entry| CoinListing {
                entry: entry.clone(),
                status: Self::status(snapshot, &entry.address),
            })
            .collect()
    }

    /// Submit `managed_coin::register<coin_type>()` through the connected wallet.
    ///
    /// The panel does not assume success; the status flips once a later
    /// refresh sees the new `CoinStore`.
    ///
    /// # Errors
    ///
    /// Returns error if `coin_type` is blank, no wallet is connected, or the
    /// wallet rejects the transaction.
    pub async fn register<A, C>(
        &self,
        controller: &SessionController<A, C>,
        coin_type: &str,
    ) -> Result<PendingTransaction>
    where
        A: WalletAdapter,
        C: NodeClient,
    {
        let coin_type = coin_type.trim();
        if coin_type.is_empty() {
            return Err(ClientError::invalid_input("coin address must not be empty"));
        }

        let payload = register_payload(coin_type);
        let pending = controller
            .sign_and_submit(&payload, Some(&TransactionOptions::REGISTER))
            .await?;
        info!(coin_type, hash = %pending.hash, "coin store registration submitted");
        Ok(pending)
    }

    /// Register the coin typed into the custom address field.
    ///
    /// # Errors
    ///
    /// Same as [`CoinRegisterPanel::register`].
    pub async fn register_custom<A, C>(
        &self,
        controller: &SessionController<A, C>,
    ) -> Result<PendingTransaction>
    where
        A: WalletAdapter,
        C: NodeClient,
    {
        self.register(controller, &self.custom_address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FakeNodeClient, NodeClients};
    use crate::session::{AccountResourceSet, SessionId, WalletSession};
    use crate::wallet::{AdapterKind, FakeWalletAdapter};
    use apbox_core::{CoinCatalog, MoveResource, NetworkName, TransactionPayload, REGISTER_FUNCTION};
    use serde_json::json;

    fn entry(symbol: &str, name: &str, address: &str) -> CoinCatalogEntry {
        CoinCatalogEntry {
            symbol: symbol.to_string(),
            name: name.to_string(),
            description: String::new(),
            address: address.to_string(),
        }
    }

    fn catalogs() -> Arc<CoinCatalogs> {
        Arc::new(CoinCatalogs::new(
            CoinCatalog::new(vec![
                entry("AC", "Alpha Coin", "0xA::m::Coin"),
                entry("BC", "Beta Coin", "0xB::m::Coin"),
            ]),
            CoinCatalog::new(vec![entry("DEV", "Dev Coin", "0xD::m::Dev")]),
        ))
    }

    fn snapshot(network: NetworkName, resources: Option<Vec<MoveResource>>) -> SessionSnapshot {
        let id = SessionId::new(1);
        SessionSnapshot {
            session: Some(WalletSession {
                id,
                adapter: AdapterKind::Petra,
                address: "0xabc".to_string(),
                network,
            }),
            resources: resources.map(|resources| AccountResourceSet {
                session: id,
                resources,
            }),
        }
    }

    #[test]
    fn test_status_requires_exact_coin_store_type() {
        let panel = CoinRegisterPanel::new(catalogs());
        let snap = snapshot(
            NetworkName::Mainnet,
            Some(vec![MoveResource::new(
                "0x1::coin::CoinStore<0xA::m::Coin>",
                json!({}),
            )]),
        );

        let listings = panel.listings(&snap);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].status, RegistrationStatus::Registered);
        assert_eq!(listings[1].status, RegistrationStatus::Unregistered);
        assert!(listings[1].can_register());

        assert_eq!(
            CoinRegisterPanel::status(&snap, "0xA::m::Coin2"),
            RegistrationStatus::Unregistered
        );
    }

    #[test]
    fn test_unknown_without_resources() {
        let panel = CoinRegisterPanel::new(catalogs());
        let listings = panel.listings(&snapshot(NetworkName::Mainnet, None));
        assert!(listings.iter().all(|l| l.status == RegistrationStatus::Unknown));
        assert!(listings.iter().all(|l| !l.can_register()));
    }

    #[test]
    fn test_catalog_follows_network() {
        let panel = CoinRegisterPanel::new(catalogs());

        let devnet = panel.listings(&snapshot(NetworkName::Devnet, Some(Vec::new())));
        assert_eq!(devnet.len(), 1);
        assert_eq!(devnet[0].entry.symbol, "DEV");

        let testnet = panel.listings(&snapshot(NetworkName::parse("testnet"), None));
        assert_eq!(testnet.len(), 1);

        assert!(panel.listings(&SessionSnapshot::default()).is_empty());
    }

    #[test]
    fn test_search_filters_symbol_or_name() {
        let mut panel = CoinRegisterPanel::new(catalogs());
        let snap = snapshot(NetworkName::Mainnet, Some(Vec::new()));

        panel.set_search("beta");
        let listings = panel.listings(&snap);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].entry.symbol, "BC");

        panel.set_search("ac");
        assert_eq!(panel.listings(&snap).len(), 1);

        panel.set_search("");
        assert_eq!(panel.listings(&snap).len(), 2);
    }

    #[test]
    fn test_connection_label() {
        assert_eq!(
            CoinRegisterPanel::connection_label(&snapshot(NetworkName::Devnet, None)),
            "You are connected to Devnet"
        );
        assert_eq!(
            CoinRegisterPanel::connection_label(&SessionSnapshot::default()),
            "You are connected to nothing."
        );
    }

    #[tokio::test]
    async fn test_register_submits_fixed_payload() {
        let clients = Arc::new(NodeClients::new(FakeNodeClient::new(), FakeNodeClient::new()));
        let controller = SessionController::new(clients);
        let wallet = FakeWalletAdapter::new(AdapterKind::Martian, "0xabc");
        controller.connect(wallet.clone()).await.expect("should connect");

        let mut panel = CoinRegisterPanel::new(catalogs());
        panel
            .register(&controller, "0xA::m::Coin")
            .await
            .expect("should submit");
        panel.set_custom_address(" 0xC::c::Custom ");
        panel.register_custom(&controller).await.expect("should submit");

        let submitted = wallet.submitted();
        assert_eq!(submitted.len(), 2);
        let (TransactionPayload::EntryFunctionPayload(first), options) = &submitted[0];
        assert_eq!(first.function, REGISTER_FUNCTION);
        assert_eq!(first.type_arguments, ["0xA::m::Coin".to_string()]);
        assert!(first.arguments.is_empty());
        assert_eq!(*options, Some(TransactionOptions::REGISTER));
        assert_eq!(submitted[1].0.type_arguments(), ["0xC::c::Custom".to_string()]);

        // no optimistic update
        assert_eq!(
            CoinRegisterPanel::status(&controller.snapshot(), "0xA::m::Coin"),
            RegistrationStatus::Unregistered
        );
    }

    #[tokio::test]
    async fn test_register_rejects_blank_address() {
        let clients = Arc::new(NodeClients::new(FakeNodeClient::new(), FakeNodeClient::new()));
        let controller: SessionController<FakeWalletAdapter, _> = SessionController::new(clients);
        let panel = CoinRegisterPanel::new(catalogs());

        let err = panel.register_custom(&controller).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput { .. }));

        let err = panel.register(&controller, "0xA::m::Coin").await.unwrap_err();
        assert!(matches!(err, ClientError::NotConnected));
    }

    #[tokio::test]
    async fn test_rejected_registration_leaves_listing_unregistered() {
        let clients = Arc::new(NodeClients::new(FakeNodeClient::new(), FakeNodeClient::new()));
        let controller = SessionController::new(clients);
        let wallet = FakeWalletAdapter::new(AdapterKind::Martian, "0xabc");
        controller.connect(wallet.clone()).await.expect("should connect");
        wallet.set_fail_submit(true);

        let panel = CoinRegisterPanel::new(catalogs());
        let err = panel.register(&controller, "0xB::m::Coin").await.unwrap_err();

        assert!(matches!(err, ClientError::Adapter { .. }));
        assert!(wallet.submitted().is_empty());
        let listings = panel.listings(&controller.snapshot());
        assert_eq!(listings[1].entry.address, "0xB::m::Coin");
        assert_eq!(listings[1].status, RegistrationStatus::Unregistered);
        assert!(listings[1].can_register());
    }
}
