//! Authentication and signing for the Kuaizhan API.
//!
//! This crate provides credential management and request signing for every
//! call made to the Kuaizhan cloud API.
//!
//! # Features
//!
//! - **Secure Credentials**: The app secret is wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **MD5 Wrap Signing**: Sorted-key canonicalization digested between two copies
//!   of the secret, as required by the Kuaizhan verifier.
//! - **Environment Loading**: Credentials can be loaded from environment variables
//!   or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, Params, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let mut params = Params::new();
//! params.insert("siteId".into(), "1001".into());
//! let signed = signer.sign_params(&params);
//! assert!(signed.contains_key("sign"));
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::{ApiCredentials, APP_KEY_ENV_VAR, APP_SECRET_ENV_VAR};
pub use error::AuthError;
pub use signer::{Params, RequestSigner, APP_KEY_PARAM, SIGN_PARAM};
