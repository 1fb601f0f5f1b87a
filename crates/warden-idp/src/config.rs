//! Identity-provider client configuration.
//!
//! The provider credentials are passed through opaquely: the project id is
//! the expected token audience, and the client email / private key pair
//! authenticates the verification call.

use std::fmt;

use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Service credential secret. Redacted in `Debug`, wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the secret for use in an outgoing request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// Configuration for the HTTP token verifier.
#[derive(Debug, Clone)]
pub struct IdpConfig {
    /// Token verification endpoint.
    pub verify_url: Url,
    /// Project the tokens must be issued for.
    pub project_id: String,
    /// Service credential identity.
    pub client_email: String,
    /// Service credential secret.
    pub private_key: PrivateKey,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl IdpConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `IDP_VERIFY_URL` (required)
    /// - `IDP_PROJECT_ID` (required)
    /// - `IDP_CLIENT_EMAIL` (required)
    /// - `IDP_PRIVATE_KEY` (required; literal `\n` sequences are unescaped)
    /// - `IDP_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, IdpConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, IdpConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(IdpConfigError::Missing(key))
        };

        let raw_url = required("IDP_VERIFY_URL")?;
        let verify_url = Url::parse(&raw_url)
            .map_err(|e| IdpConfigError::InvalidUrl("IDP_VERIFY_URL".to_string(), e.to_string()))?;

        Ok(Self {
            verify_url,
            project_id: required("IDP_PROJECT_ID")?,
            client_email: required("IDP_CLIENT_EMAIL")?,
            private_key: PrivateKey::new(required("IDP_PRIVATE_KEY")?.replace("\\n", "\n")),
            timeout_secs: lookup("IDP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum IdpConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
