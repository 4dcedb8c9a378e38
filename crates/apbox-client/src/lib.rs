//! # apbox-client
//!
//! Wallet session management and Aptos node access for ApBox.
//!
//! This crate provides:
//! - [`WalletAdapter`]: the capability surface of a wallet extension
//! - [`NodeClient`] / [`AptosNodeClient`]: fullnode REST queries
//! - [`SessionController`]: keeps the connected wallet and its on-chain
//!   resources consistent
//! - Tool panels: coin register, coin creator and sale history view-models
//! - [`CompileClient`]: posts coin creation requests to the compile proxy
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use apbox_client::{AdapterKind, FakeWalletAdapter, NodeClients, SessionController};
//!
//! # async fn example() -> apbox_client::Result<()> {
//! let clients = Arc::new(NodeClients::aptos_defaults()?);
//! let controller = SessionController::new(clients);
//!
//! let wallet = FakeWalletAdapter::new(AdapterKind::Petra, "0xcafe");
//! controller.connect(wallet).await?;
//!
//! let snapshot = controller.snapshot();
//! println!("connected: {}", snapshot.is_connected());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compile;
pub mod error;
pub mod node;
pub mod panels;
pub mod session;
pub mod wallet;

pub use compile::{CompileClient, CompileResponse, CompileService};
pub use error::{ClientError, Result};
pub use node::{AptosNodeClient, FakeNodeClient, NodeClient, NodeClients};
pub use panels::{
    CoinCreatorPanel, CoinListing, CoinRegisterPanel, RefreshTicket, RegistrationStatus,
    SaleHistoryPanel,
};
pub use session::{
    AccountResourceSet, RefreshOutcome, SessionController, SessionId, SessionSnapshot,
    WalletSession,
};
pub use wallet::{
    AdapterKind, FakeWalletAdapter, ReadyState, WalletAction, WalletAdapter, WalletEvent,
    WalletOption, wallet_options,
};
