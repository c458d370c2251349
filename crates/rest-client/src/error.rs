//! REST client error types.

use thiserror::Error;

/// Errors that can occur while dispatching a request or reading its response.
///
/// A non-2xx status is not an error at this layer; the body is handed back to
/// the caller like any other.
#[derive(Debug, Error)]
pub enum RestError {
    /// Request timed out before a response arrived.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (DNS, TCP, TLS).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body stream failed or was truncated.
    #[error("Body read error: {0}")]
    BodyRead(String),

    /// Failed to build the HTTP client.
    #[error("Client build error: {0}")]
    ClientBuild(String),
}

impl RestError {
    /// Check if the request never produced a response.
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(self, RestError::Timeout | RestError::Connection(_))
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_body() || err.is_decode() {
            RestError::BodyRead(err.to_string())
        } else if err.is_builder() {
            RestError::ClientBuild(err.to_string())
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
