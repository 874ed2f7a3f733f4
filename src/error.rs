use thiserror::Error;

/// Unified error type for the LogLake memory client.
///
/// Local validation failures and backend failures are kept as distinct
/// variants: a validation error never wraps a backend error, and backend
/// errors are propagated undecoded.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing, empty, or of an unsupported shape.
    /// Raised before any network call is attempted.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The HTTP exchange itself failed (connection, timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// The backend replied with a non-success status. The error code and
    /// message are the backend's own, passed through verbatim.
    #[error("LogLake API error (HTTP {status}, {error_code}): {message}")]
    Api {
        status: u16,
        error_code: String,
        message: String,
        request_id: Option<String>,
    },

    /// A response body could not be decoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Whether this error was raised locally, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
