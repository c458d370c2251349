//! Kuaizhan app credential management.
//!
//! The app secret is only ever used as signing key material. It is wrapped in
//! `SecretString` so it cannot leak through `Debug` output and is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the app key.
pub const APP_KEY_ENV_VAR: &str = "KUAIZHAN_APP_KEY";

/// Environment variable holding the app secret.
pub const APP_SECRET_ENV_VAR: &str = "KUAIZHAN_APP_SECRET";

/// The `(appKey, appSecret)` pair issued by the Kuaizhan developer console.
#[derive(Clone)]
pub struct ApiCredentials {
    app_key: String,
    app_secret: SecretString,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `KUAIZHAN_APP_KEY` - The app key (sent with every request)
    /// - `KUAIZHAN_APP_SECRET` - The app secret (never transmitted)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set, and
    /// `AuthError::EmptyAppKey` if the key is blank.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let app_key = std::env::var(APP_KEY_ENV_VAR)
            .map_err(|_| AuthError::MissingEnvVar(APP_KEY_ENV_VAR.into()))?;

        let app_secret = std::env::var(APP_SECRET_ENV_VAR)
            .map_err(|_| AuthError::MissingEnvVar(APP_SECRET_ENV_VAR.into()))?;

        if app_key.trim().is_empty() {
            return Err(AuthError::EmptyAppKey);
        }

        Ok(Self::new(app_key, app_secret))
    }

    /// Create credentials from explicit values.
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: SecretString::from(app_secret.into()),
        }
    }

    /// The app key (public, sent as the `appKey` parameter).
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Expose the app secret for signing.
    ///
    /// **WARNING**: Only use this as digest key material.
    /// Never log or transmit the return value.
    pub fn expose_secret(&self) -> &str {
        self.app_secret.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = ApiCredentials::new("my_app_key", "my_secret");
        assert_eq!(creds.app_key(), "my_app_key");
        assert_eq!(creds.expose_secret(), "my_secret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = ApiCredentials::new("my_app_key", "super_secret_value");
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my_app_key"));
        assert!(!debug_str.contains("super_secret_value"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
