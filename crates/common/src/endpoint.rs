//! Kuaizhan API endpoint selection.
//!
//! The platform exposes a single production origin. A custom base URL can be
//! supplied for proxies, staging mirrors, or local mock servers.

use std::fmt;
use std::str::FromStr;

/// Production API origin and path prefix.
pub const PRODUCTION_BASE_URL: &str = "https://cloud.kuaizhan.com/api";

/// Environment variable consulted by [`Endpoint::from_env`].
pub const ENDPOINT_ENV_VAR: &str = "KUAIZHAN_ENDPOINT";

/// Base endpoint every request path is appended to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// The public Kuaizhan API.
    #[default]
    Production,
    /// Any other base URL (no trailing slash required).
    Custom(String),
}

impl Endpoint {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Custom(url) => url.trim_end_matches('/'),
        }
    }

    /// Returns true if this is the production endpoint.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Load the endpoint from `KUAIZHAN_ENDPOINT`.
    ///
    /// Returns `Production` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var(ENDPOINT_ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Custom(url) => write!(f, "{}", url),
        }
    }
}

impl FromStr for Endpoint {
    type Err = ParseEndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "production" | "prod" | "" => Ok(Self::Production),
            lower if lower.starts_with("https://") || lower.starts_with("http://") => {
                if trimmed.trim_end_matches('/') == PRODUCTION_BASE_URL {
                    Ok(Self::Production)
                } else {
                    Ok(Self::Custom(trimmed.to_string()))
                }
            }
            _ => Err(ParseEndpointError(s.to_string())),
        }
    }
}

/// Error parsing an endpoint string.
#[derive(Debug, Clone)]
pub struct ParseEndpointError(String);

impl fmt::Display for ParseEndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid endpoint '{}', expected 'production' or an http(s) URL",
            self.0
        )
    }
}

impl std::error::Error for ParseEndpointError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_url() {
        let endpoint = Endpoint::Production;
        assert_eq!(endpoint.base_url(), "https://cloud.kuaizhan.com/api");
        assert!(endpoint.is_production());
    }

    #[test]
    fn test_custom_url_strips_trailing_slash() {
        let endpoint = Endpoint::Custom("http://127.0.0.1:8080/api/".into());
        assert_eq!(endpoint.base_url(), "http://127.0.0.1:8080/api");
        assert!(!endpoint.is_production());
    }

    #[test]
    fn test_parse_production_aliases() {
        assert_eq!("production".parse::<Endpoint>().unwrap(), Endpoint::Production);
        assert_eq!("PROD".parse::<Endpoint>().unwrap(), Endpoint::Production);
        assert_eq!(
            "https://cloud.kuaizhan.com/api/".parse::<Endpoint>().unwrap(),
            Endpoint::Production
        );
    }

    #[test]
    fn test_parse_custom() {
        assert_eq!(
            "http://localhost:9000/api".parse::<Endpoint>().unwrap(),
            Endpoint::Custom("http://localhost:9000/api".into())
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!("staging".parse::<Endpoint>().is_err());
        assert!("ftp://example.com".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(Endpoint::default(), Endpoint::Production);
    }

    #[test]
    fn test_display() {
        assert_eq!(Endpoint::Production.to_string(), "production");
        assert_eq!(
            Endpoint::Custom("http://localhost".into()).to_string(),
            "http://localhost"
        );
    }
}
