use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to a node HTTP daemon
#[derive(Error, Debug)]
pub enum HttpdError {
    /// Resource not found (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Server error from the daemon (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Any other non-success status
    #[error("Unexpected response ({0}): {1}")]
    Unexpected(StatusCode, String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body is not the expected JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

impl HttpdError {
    /// Returns true if the node could not be reached at all
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::NetworkError(_))
    }
}
