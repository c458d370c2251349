//! Kuaizhan API client: signing, dispatch and envelope decoding.

use crate::diagnostics::{DiagnosticEvent, DiagnosticSink, NoopSink, TracingSink};
use crate::envelope::{Envelope, Payload};
use crate::error::KuaizhanError;
use auth::{ApiCredentials, Params, RequestSigner};
use common::Endpoint;
use rest_client::{RawResponse, RestClient, RestError, TransportConfig};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// How operation wrappers treat a payload that does not fit their result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadDecoding {
    /// Return the shape's empty value and no error.
    ///
    /// The whole shape is replaced: if any one field has the wrong type, fields
    /// that did decode are discarded too. Missing fields alone are not a
    /// mismatch, since every result shape defaults them.
    #[default]
    Lenient,
    /// Return [`KuaizhanError::Payload`].
    Strict,
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Form,
    Query,
}

/// Kuaizhan API client.
///
/// Holds no per-request state, so one instance can be shared across tasks
/// (wrap it in an `Arc`). Every call signs a fresh copy of its parameters.
pub struct KuaizhanClient {
    rest: RestClient,
    credentials: ApiCredentials,
    endpoint: Endpoint,
    diagnostics: Arc<dyn DiagnosticSink>,
    payload_decoding: PayloadDecoding,
}

impl KuaizhanClient {
    /// Create a client for the production endpoint with default transport settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials) -> Result<Self, KuaizhanError> {
        Self::builder(credentials).build()
    }

    /// Create a client from `KUAIZHAN_*` environment variables.
    ///
    /// Reads credentials, `KUAIZHAN_ENDPOINT` and `KUAIZHAN_INSECURE_TLS`.
    pub fn from_env() -> Result<Self, KuaizhanError> {
        let credentials = ApiCredentials::from_env()?;
        Self::builder(credentials)
            .endpoint(Endpoint::from_env())
            .transport(TransportConfig::from_env())
            .build()
    }

    /// Start configuring a client.
    pub fn builder(credentials: ApiCredentials) -> KuaizhanClientBuilder {
        KuaizhanClientBuilder::new(credentials)
    }

    /// Get the endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Get the app key (for logging/debugging).
    pub fn app_key(&self) -> &str {
        self.credentials.app_key()
    }

    /// Get the payload decoding mode.
    pub fn payload_decoding(&self) -> PayloadDecoding {
        self.payload_decoding
    }

    /// Sign `params` and POST them as a form to `path`.
    ///
    /// Returns the envelope's `data` on `code == 200`.
    ///
    /// # Errors
    /// - `Transport` if the request could not be dispatched
    /// - `BodyRead` if the body could not be read in full
    /// - `Decode` if the body is not an envelope
    /// - `Application` if the envelope code is not 200
    pub async fn send_form(&self, path: &str, params: &Params) -> Result<Payload, KuaizhanError> {
        self.send(Verb::Form, path, params).await
    }

    /// Sign `params` and GET `path` with them as the query string.
    ///
    /// Same contract as [`send_form`](Self::send_form).
    pub async fn send_query(&self, path: &str, params: &Params) -> Result<Payload, KuaizhanError> {
        self.send(Verb::Query, path, params).await
    }

    async fn send(&self, verb: Verb, path: &str, params: &Params) -> Result<Payload, KuaizhanError> {
        let signed = RequestSigner::new(&self.credentials).sign_params(params);
        self.diagnostics.record(&DiagnosticEvent::RequestStarted {
            path,
            params: &signed,
        });

        let result = match verb {
            Verb::Form => self.rest.post_form(path, &signed).await,
            Verb::Query => self.rest.get_query(path, &signed).await,
        };

        let response = result.map_err(|e| self.report_rest_error(path, e))?;
        self.decode_envelope(path, &response)
    }

    fn report_rest_error(&self, path: &str, err: RestError) -> KuaizhanError {
        let event = match &err {
            RestError::BodyRead(_) => DiagnosticEvent::BodyReadFailed { path, error: &err },
            _ => DiagnosticEvent::TransportFailed { path, error: &err },
        };
        self.diagnostics.record(&event);
        err.into()
    }

    fn decode_envelope(&self, path: &str, response: &RawResponse) -> Result<Payload, KuaizhanError> {
        let body = response.body_text();
        self.diagnostics
            .record(&DiagnosticEvent::ResponseBody { path, body: &body });

        let envelope = Envelope::from_slice(&response.body).map_err(|e| {
            self.diagnostics
                .record(&DiagnosticEvent::EnvelopeDecodeFailed { path, error: &e });
            tracing::debug!(path = %path, status = response.status, error = %e, "Envelope decode failed");
            KuaizhanError::Decode(e)
        })?;

        if !envelope.is_success() {
            self.diagnostics.record(&DiagnosticEvent::ApplicationError {
                path,
                code: envelope.code,
                msg: &envelope.msg,
            });
            tracing::debug!(path = %path, code = envelope.code, msg = %envelope.msg, "API returned error");
        }

        envelope.into_payload()
    }

    /// Decode a payload into an operation's result shape.
    ///
    /// Under [`PayloadDecoding::Lenient`] a mismatch yields `T::default()`.
    pub(crate) fn decode_payload<T>(&self, path: &str, payload: &Payload) -> Result<T, KuaizhanError>
    where
        T: DeserializeOwned + Default,
    {
        match payload.decode::<T>() {
            Ok(value) => Ok(value),
            Err(source) => match self.payload_decoding {
                PayloadDecoding::Lenient => {
                    tracing::debug!(path = %path, error = %source, "Payload mismatch, using empty result");
                    Ok(T::default())
                }
                PayloadDecoding::Strict => Err(KuaizhanError::Payload {
                    path: path.to_string(),
                    source,
                }),
            },
        }
    }

    /// POST, then decode `data` into `T`.
    pub(crate) async fn form_as<T>(&self, path: &str, params: &Params) -> Result<T, KuaizhanError>
    where
        T: DeserializeOwned + Default,
    {
        let payload = self.send_form(path, params).await?;
        self.decode_payload(path, &payload)
    }

    /// GET, then decode `data` into `T`.
    pub(crate) async fn query_as<T>(&self, path: &str, params: &Params) -> Result<T, KuaizhanError>
    where
        T: DeserializeOwned + Default,
    {
        let payload = self.send_query(path, params).await?;
        self.decode_payload(path, &payload)
    }
}

impl std::fmt::Debug for KuaizhanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KuaizhanClient")
            .field("endpoint", &self.endpoint)
            .field("base_url", &self.rest.base_url())
            .field("app_key", &self.credentials.app_key())
            .field("payload_decoding", &self.payload_decoding)
            .finish()
    }
}

/// Builder for [`KuaizhanClient`].
pub struct KuaizhanClientBuilder {
    credentials: ApiCredentials,
    endpoint: Endpoint,
    transport: TransportConfig,
    http_client: Option<reqwest::Client>,
    diagnostics: Arc<dyn DiagnosticSink>,
    payload_decoding: PayloadDecoding,
}

impl KuaizhanClientBuilder {
    fn new(credentials: ApiCredentials) -> Self {
        Self {
            credentials,
            endpoint: Endpoint::default(),
            transport: TransportConfig::default(),
            http_client: None,
            diagnostics: Arc::new(NoopSink),
            payload_decoding: PayloadDecoding::default(),
        }
    }

    /// Set the base endpoint.
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set connection pool, timeout and TLS settings.
    ///
    /// Ignored when [`http_client`](Self::http_client) is set.
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Use a caller-configured `reqwest::Client`.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Toggle request tracing through [`TracingSink`].
    pub fn debug(mut self, enabled: bool) -> Self {
        self.diagnostics = if enabled {
            Arc::new(TracingSink)
        } else {
            Arc::new(NoopSink)
        };
        self
    }

    /// Install a custom diagnostic sink.
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Choose how payload mismatches are reported.
    pub fn payload_decoding(mut self, mode: PayloadDecoding) -> Self {
        self.payload_decoding = mode;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `KuaizhanError::Build` if the HTTP client cannot be built.
    pub fn build(self) -> Result<KuaizhanClient, KuaizhanError> {
        let base_url = self.endpoint.base_url();
        let rest = match self.http_client {
            Some(client) => RestClient::with_client(base_url, client),
            None => RestClient::new(base_url, &self.transport)
                .map_err(|e| KuaizhanError::Build(e.to_string()))?,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            app_key = %self.credentials.app_key(),
            "Kuaizhan client created"
        );

        Ok(KuaizhanClient {
            rest,
            credentials: self.credentials,
            endpoint: self.endpoint,
            diagnostics: self.diagnostics,
            payload_decoding: self.payload_decoding,
        })
    }
}
