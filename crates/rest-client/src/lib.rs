//! HTTP transport for the Kuaizhan client.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - A pooled client tuned via `TransportConfig` (connect timeout, keep-alive,
//!   idle pool limits, optional TLS verification skip)
//! - Form-encoded POST and query-string GET
//! - Raw status + body responses; status codes are never treated as failures
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::{RestClient, TransportConfig};
//! use std::collections::BTreeMap;
//!
//! let client = RestClient::new("https://cloud.kuaizhan.com/api", &TransportConfig::default())?;
//! let response = client.post_form("/v1/tbk/getSiteIds", &BTreeMap::new()).await?;
//! println!("{} {}", response.status, response.body_text());
//! ```

mod client;
mod config;
mod error;

pub use client::{encode_query, RawResponse, RestClient};
pub use config::{TransportConfig, INSECURE_TLS_ENV_VAR};
pub use error::RestError;
