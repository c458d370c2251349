//! Kuaizhan client error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when calling the Kuaizhan API.
#[derive(Debug, Error)]
pub enum KuaizhanError {
    /// The request could not be dispatched (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[source] RestError),

    /// The response body was truncated or interrupted.
    #[error("body read error: {0}")]
    BodyRead(String),

    /// The body is not a well-formed `{code, msg, data}` envelope.
    #[error("envelope decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Kuaizhan API error (well-formed envelope with a non-200 code).
    #[error("Kuaizhan API error {code}: {msg}")]
    Application {
        /// Envelope code.
        code: i64,
        /// Envelope message.
        msg: String,
    },

    /// The payload did not match the operation's shape.
    ///
    /// Only produced under [`PayloadDecoding::Strict`](crate::PayloadDecoding::Strict).
    #[error("payload decode error on {path}: {source}")]
    Payload {
        /// Endpoint path.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Credential loading error.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The HTTP client could not be built.
    #[error("client build error: {0}")]
    Build(String),
}

impl From<RestError> for KuaizhanError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::BodyRead(message) => Self::BodyRead(message),
            other => Self::Transport(other),
        }
    }
}

impl KuaizhanError {
    /// Check if the request never reached the server or never answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the server rejected the call with an envelope error.
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// Envelope code of an application error.
    pub fn application_code(&self) -> Option<i64> {
        match self {
            Self::Application { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_mapping() {
        let transport: KuaizhanError = RestError::Connection("refused".into()).into();
        assert!(transport.is_transport());

        let timeout: KuaizhanError = RestError::Timeout.into();
        assert!(timeout.is_transport());

        let body: KuaizhanError = RestError::BodyRead("eof".into()).into();
        assert!(matches!(body, KuaizhanError::BodyRead(ref m) if m == "eof"));
        assert!(!body.is_transport());
    }

    #[test]
    fn test_application_code() {
        let err = KuaizhanError::Application {
            code: 403,
            msg: "forbidden".into(),
        };
        assert!(err.is_application());
        assert_eq!(err.application_code(), Some(403));
        assert_eq!(err.to_string(), "Kuaizhan API error 403: forbidden");

        assert_eq!(KuaizhanError::BodyRead("x".into()).application_code(), None);
    }
}
