//! Coin creator panel.

use apbox_core::{
    initialize_payload, parse_decimals, CoinCreationRequest, DecimalError, PendingTransaction,
    DEFAULT_DECIMALS,
};
use tracing::{info, warn};

use crate::compile::{CompileResponse, CompileService};
use crate::error::{ClientError, Result};
use crate::node::NodeClient;
use crate::session::{SessionController, SessionSnapshot};
use crate::wallet::WalletAdapter;

/// Advisory shown while no wallet is connected.
pub const NOT_CONNECTED_ADVISORY: &str = "You are not connected to a network.";

/// Form state for creating a new coin type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinCreatorPanel {
    symbol: String,
    name: String,
    decimals_input: String,
    monitor_supply: bool,
    compiling: bool,
    last_response: Option<CompileResponse>,
}

impl Default for CoinCreatorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinCreatorPanel {
    /// Empty form with six decimals and supply monitoring on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbol: String::new(),
            name: String::new(),
            decimals_input: DEFAULT_DECIMALS.to_string(),
            monitor_supply: true,
            compiling: false,
            last_response: None,
        }
    }

    /// Set the symbol field.
    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.symbol = symbol.into();
    }

    /// Set the name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the raw decimals text.
    pub fn set_decimals_input(&mut self, input: impl Into<String>) {
        self.decimals_input = input.into();
    }

    /// Toggle supply monitoring.
    pub fn set_monitor_supply(&mut self, monitor: bool) {
        self.monitor_supply = monitor;
    }

    /// Raw decimals text.
    #[must_use]
    pub fn decimals_input(&self) -> &str {
        &self.decimals_input
    }

    /// Whether supply monitoring is selected.
    #[must_use]
    pub const fn monitor_supply(&self) -> bool {
        self.monitor_supply
    }

    /// Whether a compile request is in flight.
    #[must_use]
    pub const fn is_compiling(&self) -> bool {
        self.compiling
    }

    /// Answer to the most recent compile request.
    #[must_use]
    pub fn last_response(&self) -> Option<&CompileResponse> {
        self.last_response.as_ref()
    }

    /// Inline error for the decimals field.
    #[must_use]
    pub fn decimal_error(&self) -> Option<DecimalError> {
        parse_decimals(&self.decimals_input).err()
    }

    /// Standing advisory under the submit button.
    #[must_use]
    pub fn submit_error(snapshot: &SessionSnapshot) -> Option<&'static str> {
        if snapshot.is_connected() {
            None
        } else {
            Some(NOT_CONNECTED_ADVISORY)
        }
    }

    /// Whether Submit is enabled.
    #[must_use]
    pub fn can_submit(&self, snapshot: &SessionSnapshot) -> bool {
        snapshot.is_connected()
            && self.decimal_error().is_none()
            && !self.symbol.is_empty()
            && !self.name.is_empty()
    }

    /// Build the creation request from the form.
    ///
    /// # Errors
    ///
    /// Returns error if the decimals text is invalid or a field is empty.
    pub fn request(&self) -> Result<CoinCreationRequest> {
        let decimals = parse_decimals(&self.decimals_input)
            .map_err(|e| ClientError::invalid_input(e.to_string()))?;
        let request = CoinCreationRequest {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            decimals,
            monitor_supply: self.monitor_supply,
        };
        request.validate()?;
        Ok(request)
    }

    /// Mark a compile request as started and return what to send.
    ///
    /// # Errors
    ///
    /// Returns error if Submit is not enabled.
    pub fn begin_submit(&mut self, snapshot: &SessionSnapshot) -> Result<CoinCreationRequest> {
        if !snapshot.is_connected() {
            return Err(ClientError::NotConnected);
        }
        let request = self.request()?;
        self.compiling = true;
        Ok(request)
    }

    /// Record how a compile request settled. Always clears the compiling flag.
    pub fn finish_submit(&mut self, result: &Result<CompileResponse>) {
        self.compiling = false;
        match result {
            Ok(response) => {
                info!(status = response.status, "compile request finished");
                self.last_response = Some(response.clone());
            }
            Err(e) => warn!(error = %e, "compile request failed"),
        }
    }

    /// Send the form to the compile proxy.
    ///
    /// # Errors
    ///
    /// Returns error if Submit is not enabled or the request fails.
    pub async fn submit<S: CompileService>(
        &mut self,
        snapshot: &SessionSnapshot,
        service: &S,
    ) -> Result<CompileResponse> {
        let request = self.begin_submit(snapshot)?;
        let result = service.compile(&request).await;
        self.finish_submit(&result);
        result
    }

    /// Submit `managed_coin::initialize<coin_type>(name, symbol, decimals, monitor)`
    /// for a compiled coin module.
    ///
    /// # Errors
    ///
    /// Returns error if the form is invalid, no wallet is connected, or the
    /// wallet rejects the transaction.
    pub async fn initialize<A, C>(
        &self,
        controller: &SessionController<A, C>,
        coin_type: &str,
    ) -> Result<PendingTransaction>
    where
        A: WalletAdapter,
        C: NodeClient,
    {
        if coin_type.trim().is_empty() {
            return Err(ClientError::invalid_input("coin type must not be empty"));
        }
        let request = self.request()?;
        let payload = initialize_payload(&request, coin_type.trim());
        controller.sign_and_submit(&payload, None).await
    }
}
