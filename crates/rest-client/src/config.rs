//! Transport tuning for the pooled HTTP client.

use std::time::Duration;

/// Environment variable that disables TLS certificate verification when `true`.
pub const INSECURE_TLS_ENV_VAR: &str = "KUAIZHAN_INSECURE_TLS";

/// Connection and pool settings applied when building the `reqwest` client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Maximum time to establish a TCP/TLS connection.
    pub connect_timeout: Duration,
    /// TCP keep-alive interval for pooled connections.
    pub tcp_keepalive: Duration,
    /// Idle connections kept per host.
    pub max_idle_per_host: usize,
    /// How long an idle connection stays in the pool.
    pub idle_timeout: Duration,
    /// Whole-request timeout. `None` leaves reads unbounded.
    pub request_timeout: Option<Duration>,
    /// Skip certificate verification.
    ///
    /// Compatibility switch for the Kuaizhan service. Off unless the embedding
    /// application turns it on.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            tcp_keepalive: Duration::from_secs(30),
            max_idle_per_host: 30,
            idle_timeout: Duration::from_secs(30),
            request_timeout: None,
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Defaults, with `accept_invalid_certs` taken from `KUAIZHAN_INSECURE_TLS`.
    pub fn from_env() -> Self {
        let accept_invalid_certs = std::env::var(INSECURE_TLS_ENV_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            accept_invalid_certs,
            ..Self::default()
        }
    }

    /// Set the whole-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Enable or disable certificate verification skipping.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_verify_tls() {
        let config = TransportConfig::default();
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.max_idle_per_host, 30);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let config = TransportConfig::default()
            .with_request_timeout(Duration::from_secs(10))
            .with_accept_invalid_certs(true);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
