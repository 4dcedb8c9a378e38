//! Wallet adapter abstraction.
//!
//! A [`WalletAdapter`] is the capability surface of a browser wallet
//! extension: connect, disconnect, sign-and-submit and account/network
//! change notifications. [`FakeWalletAdapter`] is an in-memory adapter for
//! tests and local tooling.

use apbox_core::{NetworkName, PendingTransaction, TransactionOptions, TransactionPayload};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::error::{ClientError, Result};
use crate::session::SessionSnapshot;

/// Supported wallet extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    /// Martian wallet.
    Martian,
    /// Petra wallet.
    Petra,
    /// Hippo browser extension.
    HippoExtension,
    /// Pontem wallet.
    Pontem,
}

impl AdapterKind {
    /// Every supported adapter, in menu order.
    pub const ALL: [Self; 4] = [Self::Martian, Self::Petra, Self::HippoExtension, Self::Pontem];

    /// Name shown to the user.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Martian => "Martian",
            Self::Petra => "Petra",
            Self::HippoExtension => "Hippo Extension",
            Self::Pontem => "Pontem",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the wallet extension is available in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadyState {
    /// Extension present and usable.
    Installed,
    /// Extension not found.
    NotDetected,
    /// Extension can be loaded on demand.
    Loadable,
}

/// Notifications emitted by a connected adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletEvent {
    /// The user switched accounts in the extension.
    AccountChange,
    /// The user switched networks in the extension.
    NetworkChange,
}

impl WalletEvent {
    /// Both events, in subscription order.
    pub const ALL: [Self; 2] = [Self::AccountChange, Self::NetworkChange];
}

/// What the wallet menu offers for one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletAction {
    /// Installed and not the active session.
    Connect,
    /// Installed and backing the active session.
    Disconnect,
    /// Extension missing; no action.
    NotInstalled,
}

/// One row of the wallet menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletOption {
    /// Adapter the row belongs to.
    pub kind: AdapterKind,
    /// Action offered.
    pub action: WalletAction,
}

/// Build the wallet menu for `adapters` given the current session.
///
/// Only [`ReadyState::Installed`] adapters can be connected.
#[must_use]
pub fn wallet_options<A: WalletAdapter>(
    adapters: &[A],
    snapshot: &SessionSnapshot,
) -> Vec<WalletOption> {
    let active = snapshot.session.as_ref().map(|s| s.adapter);
    adapters
        .iter()
        .map(|adapter| {
            let kind = adapter.kind();
            let action = match adapter.ready_state() {
                ReadyState::Installed if active == Some(kind) => WalletAction::Disconnect,
                ReadyState::Installed => WalletAction::Connect,
                ReadyState::NotDetected | ReadyState::Loadable => WalletAction::NotInstalled,
            };
            WalletOption { kind, action }
        })
        .collect()
}

/// Capability surface of a wallet extension.
#[allow(async_fn_in_trait)]
pub trait WalletAdapter {
    /// Which extension this adapter drives.
    fn kind(&self) -> AdapterKind;

    /// Availability of the extension.
    fn ready_state(&self) -> ReadyState;

    /// Public address of the connected account.
    fn account(&self) -> Option<String>;

    /// Network the extension is pointed at.
    fn network(&self) -> NetworkName;

    /// Ask the extension for a connection.
    async fn connect(&self) -> Result<()>;

    /// Drop the connection.
    async fn disconnect(&self) -> Result<()>;

    /// Sign a payload with the connected account and submit it.
    async fn sign_and_submit_transaction(
        &self,
        payload: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> Result<PendingTransaction>;

    /// Start receiving `event`.
    fn subscribe(&self, event: WalletEvent);

    /// Stop receiving `event`.
    fn unsubscribe(&self, event: WalletEvent);
}

#[derive(Debug)]
struct FakeWalletState {
    account: Option<String>,
    network: NetworkName,
    ready_state: ReadyState,
    connected: bool,
    subscriptions: HashSet<WalletEvent>,
    submitted: Vec<(TransactionPayload, Option<TransactionOptions>)>,
    fail_connect: bool,
    fail_submit: bool,
    submit_gate: Option<Arc<Notify>>,
    connect_calls: usize,
    disconnect_calls: usize,
}

/// In-memory wallet adapter.
///
/// Clones share state, so a test can keep a handle after giving the adapter
/// to a controller and then inspect or mutate it.
#[derive(Debug, Clone)]
pub struct FakeWalletAdapter {
    kind: AdapterKind,
    state: Arc<Mutex<FakeWalletState>>,
}

impl FakeWalletAdapter {
    /// Create an installed adapter on mainnet for `account`.
    #[must_use]
    pub fn new(kind: AdapterKind, account: impl Into<String>) -> Self {
        Self {
            kind,
            state: Arc::new(Mutex::new(FakeWalletState {
                account: Some(account.into()),
                network: NetworkName::Mainnet,
                ready_state: ReadyState::Installed,
                connected: false,
                subscriptions: HashSet::new(),
                submitted: Vec::new(),
                fail_connect: false,
                fail_submit: false,
                submit_gate: None,
                connect_calls: 0,
                disconnect_calls: 0,
            })),
        }
    }

    /// Builder: start on `network`.
    #[must_use]
    pub fn with_network(self, network: NetworkName) -> Self {
        self.state.lock().network = network;
        self
    }

    /// Switch the reported account.
    pub fn set_account(&self, account: Option<String>) {
        self.state.lock().account = account;
    }

    /// Switch the reported network.
    pub fn set_network(&self, network: NetworkName) {
        self.state.lock().network = network;
    }

    /// Make subsequent `connect` calls fail.
    pub fn set_fail_connect(&self, fail: bool) {
        self.state.lock().fail_connect = fail;
    }

    /// Make subsequent submissions fail.
    pub fn set_fail_submit(&self, fail: bool) {
        self.state.lock().fail_submit = fail;
    }

    /// Report `ready_state` from now on.
    pub fn set_ready_state(&self, ready_state: ReadyState) {
        self.state.lock().ready_state = ready_state;
    }

    /// Hold the next submission, as an open approval prompt, until the
    /// returned notifier is signalled.
    pub fn hold_submit(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().submit_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Whether the adapter is currently connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    /// Whether `event` is subscribed.
    #[must_use]
    pub fn is_subscribed(&self, event: WalletEvent) -> bool {
        self.state.lock().subscriptions.contains(&event)
    }

    /// Number of `connect` calls seen.
    #[must_use]
    pub fn connect_calls(&self) -> usize {
        self.state.lock().connect_calls
    }

    /// Number of `disconnect` calls seen.
    #[must_use]
    pub fn disconnect_calls(&self) -> usize {
        self.state.lock().disconnect_calls
    }

    /// Payloads submitted so far.
    #[must_use]
    pub fn submitted(&self) -> Vec<(TransactionPayload, Option<TransactionOptions>)> {
        self.state.lock().submitted.clone()
    }
}

impl WalletAdapter for FakeWalletAdapter {
    fn kind(&self) -> AdapterKind {
        self.kind
    }

    fn ready_state(&self) -> ReadyState {
        self.state.lock().ready_state
    }

    fn account(&self) -> Option<String> {
        let state = self.state.lock();
        if state.connected {
            state.account.clone()
        } else {
            None
        }
    }

    fn network(&self) -> NetworkName {
        self.state.lock().network.clone()
    }

    async fn connect(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.connect_calls += 1;
        if state.fail_connect {
            return Err(ClientError::adapter("user rejected the request"));
        }
        state.connected = true;
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.disconnect_calls += 1;
        state.connected = false;
        Ok(())
    }

    async fn sign_and_submit_transaction(
        &self,
        payload: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let gate = self.state.lock().submit_gate.take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state.lock();
        if !state.connected {
            return Err(ClientError::adapter("wallet is not connected"));
        }
        if state.fail_submit {
            return Err(ClientError::adapter("transaction rejected"));
        }
        state.submitted.push((payload.clone(), options.copied()));
        Ok(PendingTransaction {
            hash: format!("0x{:064x}", state.submitted.len()),
        })
    }

    fn subscribe(&self, event: WalletEvent) {
        self.state.lock().subscriptions.insert(event);
    }

    fn unsubscribe(&self, event: WalletEvent) {
        self.state.lock().subscriptions.remove(&event);
    }
}
