//! Marketplace sale history panel.

use apbox_core::{SaleEvent, SaleRow};
use tracing::{debug, warn};

use crate::error::Result;
use crate::node::NodeClient;

/// Account that publishes the Topaz marketplace events.
pub const TOPAZ_OWNER: &str = "0x2c7bccf7b31baf770fdbcc768d9e9cb3d87805e255355df5db32ac9a669010a2";

/// Struct holding the Topaz event handles.
pub const TOPAZ_EVENTS_STRUCT: &str =
    "0x2c7bccf7b31baf770fdbcc768d9e9cb3d87805e255355df5db32ac9a669010a2::events::Events";

/// Event handle field carrying completed purchases.
pub const TOPAZ_EVENTS_FIELD: &str = "buy_events";

/// Sales fetched per refresh.
pub const SALES_PAGE_SIZE: u16 = 25;

/// Fetch the latest page of Topaz sales.
///
/// Events that do not decode as sales are logged and skipped.
///
/// # Errors
///
/// Returns error if the node query fails.
pub async fn fetch_sales<C: NodeClient>(client: &C) -> Result<Vec<SaleEvent>> {
    let events = client
        .events_by_event_handle(
            TOPAZ_OWNER,
            TOPAZ_EVENTS_STRUCT,
            TOPAZ_EVENTS_FIELD,
            SALES_PAGE_SIZE,
        )
        .await?;

    let sales: Vec<_> = events
        .iter()
        .filter_map(|event| match SaleEvent::from_event(event) {
            Ok(sale) => Some(sale),
            Err(e) => {
                warn!(error = %e, "skipping undecodable sale event");
                None
            }
        })
        .collect();
    debug!(events = events.len(), sales = sales.len(), "fetched sale history");
    Ok(sales)
}

/// Identifies one refresh; only the latest ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

/// Recent sales, replaced wholesale on each refresh.
///
/// When the panel lives behind a lock, call [`SaleHistoryPanel::begin_refresh`]
/// under the lock, fetch without it and hand the result to
/// [`SaleHistoryPanel::complete_refresh`]; results of superseded refreshes are
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct SaleHistoryPanel {
    sales: Vec<SaleEvent>,
    latest: u64,
    loading: bool,
}

impl SaleHistoryPanel {
    /// Empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh, superseding any in flight.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.latest += 1;
        self.loading = true;
        RefreshTicket(self.latest)
    }

    /// Publish the result of the refresh identified by `ticket`.
    ///
    /// Returns `Ok(false)` if a newer refresh has started since. A failed
    /// fetch keeps the current list.
    ///
    /// # Errors
    ///
    /// Returns the fetch error for the latest refresh.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<SaleEvent>>,
    ) -> Result<bool> {
        if ticket.0 != self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "dropping superseded sale refresh");
            return Ok(false);
        }
        self.loading = false;
        match result {
            Ok(sales) => {
                self.sales = sales;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "sale history refresh failed");
                Err(e)
            }
        }
    }

    /// Fetch and publish the latest sales.
    ///
    /// # Errors
    ///
    /// Returns error if the node query fails.
    pub async fn refresh<C: NodeClient>(&mut self, client: &C) -> Result<usize> {
        let ticket = self.begin_refresh();
        let result = fetch_sales(client).await;
        self.complete_refresh(ticket, result)?;
        Ok(self.sales.len())
    }

    /// Whether a refresh is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current sales in node order.
    #[must_use]
    pub fn sales(&self) -> &[SaleEvent] {
        &self.sales
    }

    /// Display rows as of `now_micros`.
    #[must_use]
    pub fn rows(&self, now_micros: u64) -> Vec<SaleRow> {
        self.sales.iter().map(|s| s.to_row(now_micros)).collect()
    }
}
