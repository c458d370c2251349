//! Pooled form/query REST client around reqwest.

use crate::config::TransportConfig;
use crate::error::RestError;
use reqwest::{Client, Response};
use std::collections::BTreeMap;

/// Raw HTTP response: status plus the fully read body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// REST client that posts forms and issues query-string GETs.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL and transport settings.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://cloud.kuaizhan.com/api")
    /// * `config` - Connection pool, timeout and TLS settings
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, config: &TransportConfig) -> Result<Self, RestError> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.tcp_keepalive)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        if config.accept_invalid_certs {
            tracing::warn!(base_url = %base_url, "TLS certificate verification disabled");
        }

        let client = builder
            .build()
            .map_err(|e| RestError::ClientBuild(e.to_string()))?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a new REST client with default transport settings.
    pub fn with_defaults(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, &TransportConfig::default())
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `params` as an `application/x-www-form-urlencoded` body.
    ///
    /// # Arguments
    /// * `path` - Request path (e.g., "/v1/tbk/getDomain")
    /// * `params` - Form fields
    pub async fn post_form(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<RawResponse, RestError> {
        let url = self.build_url(path, None);
        tracing::debug!(path = %path, fields = params.len(), "POST form request");

        let response = self.client.post(&url).form(params).send().await?;
        self.read_response(response).await
    }

    /// GET with `params` encoded as the query string.
    pub async fn get_query(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<RawResponse, RestError> {
        let query = encode_query(params);
        let url = self.build_url(path, Some(&query));
        tracing::debug!(path = %path, fields = params.len(), "GET query request");

        let response = self.client.get(&url).send().await?;
        self.read_response(response).await
    }

    /// Build a full URL from path and optional query string.
    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// Read the whole body regardless of status.
    async fn read_response(&self, response: Response) -> Result<RawResponse, RestError> {
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Non-success HTTP status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RestError::BodyRead(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

/// Encode parameters as `application/x-www-form-urlencoded` query text.
pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_no_query() {
        let client = RestClient::with_defaults("https://api.example.com").unwrap();
        assert_eq!(
            client.build_url("/v1/tbk/getDomain", None),
            "https://api.example.com/v1/tbk/getDomain"
        );
    }

    #[test]
    fn test_build_url_with_query() {
        let client = RestClient::with_defaults("https://api.example.com").unwrap();
        assert_eq!(
            client.build_url("/v1/tbk/getSitePvUv", Some("domain=abc&sign=00")),
            "https://api.example.com/v1/tbk/getSitePvUv?domain=abc&sign=00"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let client = RestClient::with_defaults("https://api.example.com/").unwrap();
        assert_eq!(
            client.build_url("/v1/tbk/getDomain", None),
            "https://api.example.com/v1/tbk/getDomain"
        );
    }

    #[test]
    fn test_build_url_empty_query() {
        let client = RestClient::with_defaults("https://api.example.com").unwrap();
        assert_eq!(
            client.build_url("/v1/tbk/getSiteIds", Some("")),
            "https://api.example.com/v1/tbk/getSiteIds"
        );
    }

    #[test]
    fn test_encode_query_escapes_values() {
        let query = encode_query(&params(&[
            ("url", "https://a.b/?x=1&y=2"),
            ("appKey", "k"),
        ]));
        assert_eq!(query, "appKey=k&url=https%3A%2F%2Fa.b%2F%3Fx%3D1%26y%3D2");
    }

    #[test]
    fn test_insecure_client_builds() {
        let config = TransportConfig::default().with_accept_invalid_certs(true);
        assert!(RestClient::new("https://api.example.com", &config).is_ok());
    }

    #[tokio::test]
    async fn test_post_form_sends_urlencoded_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/tbk/getDomain"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("siteId=1001"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::with_defaults(&server.uri()).unwrap();
        let response = client
            .post_form("/v1/tbk/getDomain", &params(&[("siteId", "1001")]))
            .await
            .expect("response");

        assert_eq!(response.status, 200);
        assert_eq!(response.body_text(), "ok");
    }

    #[tokio::test]
    async fn test_get_query_sends_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/tbk/getSitePvUv"))
            .and(query_param("domain", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::with_defaults(&server.uri()).unwrap();
        let response = client
            .get_query("/v1/tbk/getSitePvUv", &params(&[("domain", "abc")]))
            .await
            .expect("response");

        assert_eq!(response.body, b"{}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = RestClient::with_defaults(&server.uri()).unwrap();
        let response = client
            .post_form("/anything", &BTreeMap::new())
            .await
            .expect("response");

        assert_eq!(response.status, 500);
        assert_eq!(response.body_text(), "boom");
    }
}
