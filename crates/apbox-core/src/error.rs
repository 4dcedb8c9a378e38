//! Error types for core ApBox operations.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while building or decoding core ApBox types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The embedded or supplied coin catalog could not be used.
    #[error("invalid coin catalog: {message}")]
    InvalidCatalog {
        /// Description of the catalog problem.
        message: String,
    },

    /// A coin creation request failed validation.
    #[error("invalid coin request: {message}")]
    InvalidRequest {
        /// Description of the validation failure.
        message: String,
    },

    /// An on-chain event did not have the expected shape.
    #[error("malformed event #{sequence_number}: {message}")]
    MalformedEvent {
        /// Sequence number of the offending event.
        sequence_number: u64,
        /// What was missing or wrong.
        message: String,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid catalog error.
    #[must_use]
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a malformed event error.
    #[must_use]
    pub fn malformed_event(sequence_number: u64, message: impl Into<String>) -> Self {
        Self::MalformedEvent {
            sequence_number,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_display() {
        let err = CoreError::invalid_request("symbol is empty");
        assert_eq!(err.to_string(), "invalid coin request: symbol is empty");
    }

    #[test]
    fn test_malformed_event_display() {
        let err = CoreError::malformed_event(42, "missing price");
        assert!(err.to_string().contains("#42"));
        assert!(err.to_string().contains("missing price"));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = CoreError::from(serde_err);
        assert!(matches!(err, CoreError::Json(_)));
    }
}
