//! Client side of the compile proxy.

use apbox_core::CoinCreationRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

/// What the compile proxy answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, unparsed.
    pub body: String,
}

impl CompileResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Something that can compile a coin creation request.
#[allow(async_fn_in_trait)]
pub trait CompileService {
    /// Submit `request` for compilation.
    async fn compile(&self, request: &CoinCreationRequest) -> Result<CompileResponse>;
}

/// Posts creation requests to `POST /api/compile`.
#[derive(Clone)]
pub struct CompileClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl CompileClient {
    /// Create a client for the proxy at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let url =
            Url::parse(endpoint).map_err(|e| ClientError::invalid_url(endpoint, e.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: url,
            http,
        })
    }

    /// Proxy endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for CompileClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl CompileService for CompileClient {
    async fn compile(&self, request: &CoinCreationRequest) -> Result<CompileResponse> {
        debug!(symbol = %request.symbol, endpoint = %self.endpoint, "requesting compilation");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(CompileResponse { status, body })
    }
}
