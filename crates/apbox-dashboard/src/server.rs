//! Dashboard server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::routes::create_router;
use crate::state::DashboardState;

/// Dashboard server for the ApBox API.
///
/// Serves the compile proxy, coin catalogs and sale history.
#[derive(Debug, Clone)]
pub struct DashboardServer {
    state: Arc<DashboardState>,
}

impl DashboardServer {
    /// Create a new dashboard server with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let state = Arc::new(DashboardState::new(config)?);
        Ok(Self { state })
    }

    /// Create a server around existing state.
    #[must_use]
    pub fn from_state(state: Arc<DashboardState>) -> Self {
        Self { state }
    }

    /// Get the dashboard state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<DashboardState> {
        self.state.clone()
    }

    /// Start the dashboard server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> DashboardResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| DashboardError::BindFailed(addr, e))?;

        info!(addr = %addr, "Dashboard server listening");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| DashboardError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the dashboard server with graceful shutdown support.
    ///
    /// The server will shut down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(
        &self,
        addr: SocketAddr,
        shutdown: F,
    ) -> DashboardResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| DashboardError::BindFailed(addr, e))?;

        info!(
            addr = %addr,
            compile_api = self.state.config().compile_api.as_deref().unwrap_or("<unset>"),
            "Dashboard server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| DashboardError::Internal(e.to_string()))?;

        info!("Dashboard server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_server_creation() {
        let server = DashboardServer::new(DashboardConfig::default()).unwrap();

        assert!(server.state().config().compile_api.is_none());
    }

    #[test]
    fn test_server_rejects_bad_config() {
        let config = DashboardConfig::default().with_compile_api("nope");

        assert!(DashboardServer::new(config).is_err());
    }

    #[test]
    fn test_server_clone_shares_state() {
        let server = DashboardServer::new(DashboardConfig::default()).unwrap();
        let cloned = server.clone();

        assert!(Arc::ptr_eq(&server.state(), &cloned.state()));
    }

    #[tokio::test]
    async fn test_serve_with_shutdown() {
        let server = DashboardServer::new(DashboardConfig::default()).unwrap();
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));

        let handle = tokio::spawn(async move {
            server
                .serve_with_shutdown(addr, tokio::time::sleep(Duration::from_millis(50)))
                .await
        });

        let result = handle.await.expect("join");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_bind_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = DashboardServer::new(DashboardConfig::default()).unwrap();
        let result = server.serve_with_shutdown(addr, async {}).await;

        assert!(matches!(result, Err(DashboardError::BindFailed(_, _))));
    }
}
