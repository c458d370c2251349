//! MD5 request signing for the Kuaizhan API.
//!
//! The remote verifier expects `md5(secret + canonical + secret)` where the
//! canonical string is every non-empty parameter, sorted by name, written as
//! `name` immediately followed by `value` with no separators.

use crate::credentials::ApiCredentials;
use md5::{Digest, Md5};
use std::collections::BTreeMap;

/// Request parameters, keyed by name.
///
/// A `BTreeMap` keeps names unique and iterates them in byte-wise ascending
/// order, which is exactly the canonical order.
pub type Params = BTreeMap<String, String>;

/// Name of the parameter carrying the app key.
pub const APP_KEY_PARAM: &str = "appKey";

/// Name of the parameter carrying the signature.
pub const SIGN_PARAM: &str = "sign";

/// Request signer for authenticated Kuaizhan API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Build the canonical signing input from a parameter set.
    ///
    /// Empty values are skipped.
    pub fn canonicalize(params: &Params) -> String {
        params
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .fold(String::new(), |mut raw, (k, v)| {
                raw.push_str(k);
                raw.push_str(v);
                raw
            })
    }

    /// Digest a canonical string and return the lowercase hex signature.
    ///
    /// The secret is both prepended and appended.
    pub fn sign(&self, canonical: &str) -> String {
        let secret = self.credentials.expose_secret().as_bytes();

        let mut hasher = Md5::new();
        hasher.update(secret);
        hasher.update(canonical.as_bytes());
        hasher.update(secret);
        hex::encode(hasher.finalize())
    }

    /// Return a signed copy of `params`.
    ///
    /// This method:
    /// 1. Sets `appKey`, overwriting any existing value
    /// 2. Canonicalizes the non-empty parameters in sorted order
    /// 3. Signs the canonical string
    /// 4. Sets `sign`, overwriting any existing value
    ///
    /// The input is left untouched, so every call produces a fresh signature.
    pub fn sign_params(&self, params: &Params) -> Params {
        let mut signed = params.clone();
        signed.insert(
            APP_KEY_PARAM.to_string(),
            self.credentials.app_key().to_string(),
        );

        let signature = self.sign(&Self::canonicalize(&signed));
        signed.insert(SIGN_PARAM.to_string(), signature);
        signed
    }

    /// Check the `sign` field of an already-signed parameter set.
    ///
    /// Returns false if `sign` is missing or the `appKey` does not belong to
    /// these credentials.
    pub fn verify(&self, signed: &Params) -> bool {
        let Some(signature) = signed.get(SIGN_PARAM) else {
            return false;
        };
        if signed.get(APP_KEY_PARAM).map(String::as_str) != Some(self.credentials.app_key()) {
            return false;
        }

        let mut unsigned = signed.clone();
        unsigned.remove(SIGN_PARAM);
        self.sign(&Self::canonicalize(&unsigned)) == *signature
    }
}
