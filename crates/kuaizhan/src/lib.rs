//! Kuaizhan cloud API client.
//!
//! This crate provides a typed client for the Kuaizhan site-building API with:
//!
//! - **Request signing**: Every request carries `appKey` and an MD5 `sign`
//! - **Envelope decoding**: `{code, msg, data}` responses become `Payload` or
//!   `KuaizhanError::Application`
//! - **Diagnostics**: An injectable sink observes each step of a call
//! - **Operations**: Domains, short links, pages and sites
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ApiCredentials;
//! use kuaizhan::KuaizhanClient;
//!
//! let credentials = ApiCredentials::from_env()?;
//! let client = KuaizhanClient::builder(credentials).debug(true).build()?;
//!
//! let domain = client.tbk_domain("5001").await?;
//! let short = client.tbk_gen_short_url("https://example.com/?a=b", "").await?;
//!
//! // Raw access for endpoints without a wrapper
//! let mut params = auth::Params::new();
//! params.insert("siteId".into(), "5001".into());
//! let payload = client.send_form("/v1/tbk/getDomain", &params).await?;
//! println!("{}", payload.get());
//! ```

mod client;
mod diagnostics;
mod envelope;
mod error;
mod operations;
mod responses;

pub use auth::{ApiCredentials, Params};
pub use client::{KuaizhanClient, KuaizhanClientBuilder, PayloadDecoding};
pub use common::Endpoint;
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, NoopSink, TracingSink};
pub use envelope::{Envelope, Payload, SUCCESS_CODE};
pub use error::KuaizhanError;
pub use operations::{
    paths, SiteLookup, DEFAULT_PAGE_TEMPLATE, DEFAULT_SHORT_URL_TYPE, DEFAULT_SITE_TYPE,
};
pub use responses::{Page, RevertedShortUrl, Site, SiteTraffic};
pub use rest_client::TransportConfig;
