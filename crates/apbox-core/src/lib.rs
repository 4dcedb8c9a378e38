//! # apbox-core
//!
//! Core Aptos types shared by the ApBox toolbox.
//!
//! This crate provides:
//! - Network naming and default fullnode endpoints
//! - The static coin catalog used by the coin register tool
//! - Entry-function transaction payloads (`managed_coin::register` / `initialize`)
//! - Coin creation requests and decimal validation
//! - Marketplace sale events with age and price formatting
//!
//! Nothing in here performs I/O. Network access lives in `apbox-client`.
//!
//! ## Example
//!
//! ```rust
//! use apbox_core::{CoinCatalogs, NetworkName, register_payload};
//!
//! # fn example() -> apbox_core::Result<()> {
//! let catalogs = CoinCatalogs::builtin()?;
//! let catalog = catalogs.for_network(&NetworkName::Mainnet);
//!
//! for entry in catalog.filter("usd") {
//!     let payload = register_payload(&entry.address);
//!     println!("{} -> {}", entry.symbol, serde_json::to_string(&payload)?);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod coin;
pub mod error;
pub mod network;
pub mod payload;
pub mod resource;
pub mod sale;
pub mod serde_u64;

pub use catalog::{coin_store_type, CoinCatalog, CoinCatalogEntry, CoinCatalogs};
pub use coin::{parse_decimals, CoinCreationRequest, DecimalError, DEFAULT_DECIMALS, MAX_DECIMALS};
pub use error::{CoreError, Result};
pub use network::{Network, NetworkName};
pub use payload::{
    initialize_payload, register_payload, EntryFunctionPayload, PendingTransaction,
    TransactionOptions, TransactionPayload, INITIALIZE_FUNCTION, REGISTER_FUNCTION,
};
pub use resource::{MoveEvent, MoveResource};
pub use sale::{format_age, format_price, SaleEvent, SaleRow};

/// One APT in octas (base units).
pub const OCTAS_PER_APT: u64 = 100_000_000;
