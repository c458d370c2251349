//! Diagnostic sink for request tracing.
//!
//! The client reports each step of a call to a [`DiagnosticSink`]. Sinks only
//! observe; nothing they do changes the outcome of a call.

use auth::Params;
use std::fmt;

/// One observable step of a request.
#[derive(Debug, Clone, Copy)]
pub enum DiagnosticEvent<'a> {
    /// A signed request is about to be sent.
    RequestStarted {
        path: &'a str,
        params: &'a Params,
    },
    /// The request could not be dispatched.
    TransportFailed {
        path: &'a str,
        error: &'a dyn std::error::Error,
    },
    /// The response body could not be read in full.
    BodyReadFailed {
        path: &'a str,
        error: &'a dyn std::error::Error,
    },
    /// Raw response body, before decoding.
    ResponseBody { path: &'a str, body: &'a str },
    /// The body is not a valid envelope.
    EnvelopeDecodeFailed {
        path: &'a str,
        error: &'a dyn std::error::Error,
    },
    /// The envelope carried a non-success code.
    ApplicationError {
        path: &'a str,
        code: i64,
        msg: &'a str,
    },
}

impl DiagnosticEvent<'_> {
    /// Endpoint path the event belongs to.
    pub fn path(&self) -> &str {
        match self {
            Self::RequestStarted { path, .. }
            | Self::TransportFailed { path, .. }
            | Self::BodyReadFailed { path, .. }
            | Self::ResponseBody { path, .. }
            | Self::EnvelopeDecodeFailed { path, .. }
            | Self::ApplicationError { path, .. } => path,
        }
    }

    /// Returns true for the failure events.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            Self::RequestStarted { .. } | Self::ResponseBody { .. }
        )
    }
}

impl fmt::Display for DiagnosticEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestStarted { path, params } => {
                write!(f, "Begin request {} with values {:?}", path, params)
            }
            Self::TransportFailed { path, error } => write!(f, "Request {} error {}", path, error),
            Self::BodyReadFailed { path, error } => {
                write!(f, "Read response body {} error {}", path, error)
            }
            Self::ResponseBody { path, body } => write!(f, "Got response body {} {}", path, body),
            Self::EnvelopeDecodeFailed { path, error } => {
                write!(f, "Unmarshal response body {} error {}", path, error)
            }
            Self::ApplicationError { path, code, msg } => {
                write!(f, "Api {} returned error code:{},{}", path, code, msg)
            }
        }
    }
}

/// Receiver for diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: &DiagnosticEvent<'_>);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _event: &DiagnosticEvent<'_>) {}
}

/// Sink that forwards events to `tracing` under the `kuaizhan::diagnostics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &DiagnosticEvent<'_>) {
        if event.is_failure() {
            tracing::warn!(target: "kuaizhan::diagnostics", path = %event.path(), "{}", event);
        } else {
            tracing::debug!(target: "kuaizhan::diagnostics", path = %event.path(), "{}", event);
        }
    }
}
