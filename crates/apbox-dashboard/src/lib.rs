//! # apbox-dashboard
//!
//! HTTP API for the ApBox toolbox, built on axum.
//!
//! The centrepiece is the compile proxy: the coin creator posts
//! `{symbol, name, decimal, monitor}` to `/api/compile`, which validates it,
//! forwards the body to the service named by `COMPILE_API` and relays the
//! upstream status and body back.
//!
//! ## Example
//!
//! ```rust,no_run
//! use apbox_dashboard::{DashboardConfig, DashboardServer};
//!
//! # async fn example() -> apbox_dashboard::DashboardResult<()> {
//! let config = DashboardConfig::default().with_compile_api("http://localhost:9000/compile");
//! let server = DashboardServer::new(config)?;
//! server.serve("127.0.0.1:3000".parse().unwrap()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/health` | GET | Liveness and uptime |
//! | `/api/compile` | POST | Forward a coin creation request to the compile service |
//! | `/api/catalog/{network}` | GET | Registrable coins for `mainnet` or `devnet`, `?search=` filters |
//! | `/api/sales` | GET | Latest 25 Topaz sales from mainnet |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

// Re-export main types
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use server::DashboardServer;
pub use state::DashboardState;
