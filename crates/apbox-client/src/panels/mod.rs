//! Tool panels.
//!
//! Each panel is a view-model: it holds the user's input, derives what the
//! UI shows from a [`SessionSnapshot`](crate::SessionSnapshot) and issues
//! one-shot actions through the session controller or the compile proxy.

mod creator;
mod history;
mod register;

pub use creator::{CoinCreatorPanel, NOT_CONNECTED_ADVISORY};
pub use history::{
    fetch_sales, RefreshTicket, SaleHistoryPanel, TOPAZ_EVENTS_FIELD, TOPAZ_EVENTS_STRUCT,
    TOPAZ_OWNER, SALES_PAGE_SIZE,
};
pub use register::{CoinListing, CoinRegisterPanel, RegistrationStatus};
