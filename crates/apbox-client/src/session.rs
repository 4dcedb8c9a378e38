//! Wallet session controller.
//!
//! The controller owns "which wallet is connected" and "what resources does
//! that account hold" and keeps the two consistent:
//!
//! - at most one [`WalletSession`] is active;
//! - switching adapters tears the old session down before the new one is
//!   established;
//! - the published [`AccountResourceSet`] always belongs to the published
//!   session, or is `None`.
//!
//! Resource fetches and signature prompts run without holding the session
//! lock. Each fetch carries the [`SessionId`] it was started for and its
//! result is dropped if the session changed in the meantime.

use apbox_core::{
    MoveResource, NetworkName, PendingTransaction, TransactionOptions, TransactionPayload,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::node::{NodeClient, NodeClients};
use crate::wallet::{AdapterKind, WalletAdapter, WalletEvent};

/// Identifies one published session. Never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    /// Wrap a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// A connected wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Session tag.
    pub id: SessionId,
    /// Adapter the session was established through.
    pub adapter: AdapterKind,
    /// Connected account address.
    pub address: String,
    /// Network the wallet reports.
    pub network: NetworkName,
}

/// Resources held by the session's account, tagged with the session that
/// fetched them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResourceSet {
    /// Session the resources were fetched for.
    pub session: SessionId,
    /// Resources in node order.
    pub resources: Vec<MoveResource>,
}

impl AccountResourceSet {
    /// Whether a resource with exactly this type tag is present.
    #[must_use]
    pub fn contains_type(&self, resource_type: &str) -> bool {
        self.resources
            .iter()
            .any(|r| r.resource_type == resource_type)
    }
}

/// What panels observe: the session and its resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Active session, if any.
    pub session: Option<WalletSession>,
    /// Resources of the active session, once fetched.
    pub resources: Option<AccountResourceSet>,
}

impl SessionSnapshot {
    /// Whether a wallet is connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Network of the active session.
    #[must_use]
    pub fn network(&self) -> Option<&NetworkName> {
        self.session.as_ref().map(|s| &s.network)
    }
}

/// Result of a resource refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Resources were published; carries the resource count.
    Applied(usize),
    /// No session is active; resources are `None`.
    Cleared,
    /// The session changed while the fetch was in flight.
    Discarded,
    /// The session's network has no node client.
    Skipped,
}

struct Connected<A> {
    adapter: Arc<A>,
    session: WalletSession,
}

/// Keeps the wallet session and its account resources consistent.
pub struct SessionController<A, C> {
    clients: Arc<NodeClients<C>>,
    active: Mutex<Option<Connected<A>>>,
    next_id: AtomicU64,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<A: WalletAdapter, C: NodeClient> SessionController<A, C> {
    /// Create a controller with no session.
    #[must_use]
    pub fn new(clients: Arc<NodeClients<C>>) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());
        Self {
            clients,
            active: Mutex::new(None),
            next_id: AtomicU64::new(1),
            snapshot_tx,
        }
    }

    /// Current session and resources.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<WalletSession> {
        self.snapshot_tx.borrow().session.clone()
    }

    /// Connect through `adapter`.
    ///
    /// Connecting the adapter that is already connected is a no-op. A
    /// different connected adapter is fully disconnected first. After the new
    /// session is published its resources are fetched; a failed fetch is
    /// logged and does not fail the connect.
    ///
    /// # Errors
    ///
    /// Returns error if tearing down the previous adapter or connecting the
    /// new one fails, or if the wallet reports no account.
    pub async fn connect(&self, adapter: A) -> Result<WalletSession> {
        let session = {
            let mut active = self.active.lock().await;

            if let Some(current) = active.as_ref() {
                if current.adapter.kind() == adapter.kind() {
                    debug!(adapter = %adapter.kind(), "adapter already connected");
                    return Ok(current.session.clone());
                }
            }
            if let Some(previous) = active.take() {
                self.teardown(previous).await?;
            }

            adapter.connect().await?;
            let Some(address) = adapter.account() else {
                if let Err(e) = adapter.disconnect().await {
                    warn!(adapter = %adapter.kind(), error = %e, "disconnect after missing account failed");
                }
                return Err(ClientError::NoAccount {
                    adapter: adapter.kind().label().to_string(),
                });
            };
            for event in WalletEvent::ALL {
                adapter.subscribe(event);
            }

            let session = WalletSession {
                id: self.allocate_id(),
                adapter: adapter.kind(),
                address,
                network: adapter.network(),
            };
            self.publish(Some(session.clone()));
            info!(
                adapter = %session.adapter,
                address = %session.address,
                network = %session.network,
                id = %session.id,
                "wallet connected"
            );
            *active = Some(Connected {
                adapter: Arc::new(adapter),
                session: session.clone(),
            });
            session
        };

        self.refresh_logged().await;
        Ok(session)
    }

    /// Disconnect the active adapter. No-op when nothing is connected.
    ///
    /// The session and resources are cleared even if the adapter reports a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns error if the adapter fails to disconnect.
    pub async fn disconnect(&self) -> Result<()> {
        let mut active = self.active.lock().await;
        match active.take() {
            Some(previous) => self.teardown(previous).await,
            None => Ok(()),
        }
    }

    /// React to an account or network change reported by the adapter.
    ///
    /// A changed address or network republishes the session under a new id
    /// and refreshes resources. A wallet that no longer reports an account
    /// ends the session.
    ///
    /// # Errors
    ///
    /// Returns error if the follow-up refresh or teardown fails.
    pub async fn handle_wallet_event(&self, event: WalletEvent) -> Result<RefreshOutcome> {
        {
            let mut active = self.active.lock().await;
            let Some(connected) = active.as_mut() else {
                debug!(?event, "wallet event without a session");
                return Ok(RefreshOutcome::Cleared);
            };

            let Some(address) = connected.adapter.account() else {
                info!(?event, "wallet no longer reports an account");
                if let Some(previous) = active.take() {
                    self.teardown(previous).await?;
                }
                return Ok(RefreshOutcome::Cleared);
            };
            let network = connected.adapter.network();

            if address != connected.session.address || network != connected.session.network {
                let session = WalletSession {
                    id: self.allocate_id(),
                    adapter: connected.session.adapter,
                    address,
                    network,
                };
                info!(
                    ?event,
                    address = %session.address,
                    network = %session.network,
                    id = %session.id,
                    "wallet session changed"
                );
                self.publish(Some(session.clone()));
                connected.session = session;
            }
        }

        self.refresh().await
    }

    /// Fetch resources for the active session and publish them.
    ///
    /// # Errors
    ///
    /// Returns error if the node query fails; the previously published
    /// resources are left in place.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let current = self.snapshot_tx.borrow().session.clone();
        let Some(session) = current else {
            self.snapshot_tx
                .send_if_modified(|snapshot| snapshot.resources.take().is_some());
            return Ok(RefreshOutcome::Cleared);
        };

        let Some(client) = self.clients.for_network(&session.network) else {
            debug!(network = %session.network, "no node client for network, skipping resource fetch");
            return Ok(RefreshOutcome::Skipped);
        };

        let resources = client.account_resources(&session.address).await?;
        let count = resources.len();
        let applied = self.snapshot_tx.send_if_modified(|snapshot| {
            if snapshot.session.as_ref().map(|s| s.id) != Some(session.id) {
                return false;
            }
            snapshot.resources = Some(AccountResourceSet {
                session: session.id,
                resources,
            });
            true
        });

        if applied {
            debug!(id = %session.id, count, "account resources updated");
            Ok(RefreshOutcome::Applied(count))
        } else {
            debug!(id = %session.id, "session changed during fetch, dropping resources");
            Ok(RefreshOutcome::Discarded)
        }
    }

    /// Sign and submit `payload` with the connected wallet.
    ///
    /// The approval prompt is awaited outside the session lock, so a pending
    /// prompt never blocks a disconnect, an adapter switch or a wallet event.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConnected`] without a session, or the
    /// adapter's error.
    pub async fn sign_and_submit(
        &self,
        payload: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let (adapter, id) = {
            let active = self.active.lock().await;
            let connected = active.as_ref().ok_or(ClientError::NotConnected)?;
            (Arc::clone(&connected.adapter), connected.session.id)
        };
        let pending = adapter.sign_and_submit_transaction(payload, options).await?;
        info!(%id, function = payload.function(), hash = %pending.hash, "transaction submitted");
        Ok(pending)
    }

    async fn refresh_logged(&self) {
        match self.refresh().await {
            Ok(outcome) => debug!(?outcome, "resource refresh finished"),
            Err(e) => warn!(error = %e, "resource refresh failed"),
        }
    }

    async fn teardown(&self, previous: Connected<A>) -> Result<()> {
        for event in WalletEvent::ALL {
            previous.adapter.unsubscribe(event);
        }
        self.publish(None);
        previous.adapter.disconnect().await?;
        info!(adapter = %previous.session.adapter, id = %previous.session.id, "wallet disconnected");
        Ok(())
    }

    fn publish(&self, session: Option<WalletSession>) {
        self.snapshot_tx.send_replace(SessionSnapshot {
            session,
            resources: None,
        });
    }

    fn allocate_id(&self) -> SessionId {
        SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl<A, C> fmt::Debug for SessionController<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("snapshot", &*self.snapshot_tx.borrow())
            .finish_non_exhaustive()
    }
}
