//! Error types for wallet and node operations.

use apbox_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to a wallet, a node or the compile proxy.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The wallet adapter rejected a request.
    #[error("wallet adapter error: {message}")]
    Adapter {
        /// Description from the adapter.
        message: String,
    },

    /// An action needs a wallet session but none is active.
    #[error("not connected to a wallet")]
    NotConnected,

    /// The wallet connected but did not expose an account.
    #[error("wallet {adapter} did not report an account")]
    NoAccount {
        /// Adapter label.
        adapter: String,
    },

    /// The fullnode answered with a non-success status.
    #[error("node returned {status}: {message}")]
    Node {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// A configured endpoint is not a usable URL.
    #[error("invalid URL {url}: {message}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    /// User input failed validation.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Core type error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// Create an adapter error.
    #[must_use]
    pub fn adapter(message: impl Into<String>) -> Self {
        Self::Adapter {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_error_display() {
        let err = ClientError::Node {
            status: 404,
            message: "account not found".to_string(),
        };
        assert_eq!(err.to_string(), "node returned 404: account not found");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err = ClientError::from(CoreError::invalid_request("name must not be empty"));
        assert_eq!(err.to_string(), "invalid coin request: name must not be empty");
    }

    #[test]
    fn test_no_account_display() {
        let err = ClientError::NoAccount {
            adapter: "Petra".to_string(),
        };
        assert!(err.to_string().contains("Petra"));
    }
}
