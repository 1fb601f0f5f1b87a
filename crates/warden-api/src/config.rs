//! # Service Configuration
//!
//! Read once at startup from the environment. Identity-provider credentials
//! are loaded separately by [`warden_idp::IdpConfig::from_env`].

use std::time::Duration;

use warden_core::{DeploymentMode, UnknownDeploymentMode};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Service-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Selects verbose or sanitized error responses.
    pub mode: DeploymentMode,
    /// Bounded wait applied to each token verification.
    pub verify_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mode: DeploymentMode::default(),
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 3000)
    /// - `APP_ENV`: `development` or `production` (default: production)
    /// - `VERIFY_TIMEOUT_MS` (default: 5000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let mode = match lookup("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => DeploymentMode::default(),
        };

        let verify_timeout = match lookup("VERIFY_TIMEOUT_MS") {
            Some(raw) => {
                let parsed = raw.trim().parse::<u64>();
                match parsed {
                    Ok(ms) if ms > 0 => Duration::from_millis(ms),
                    _ => return Err(ConfigError::InvalidNumber("VERIFY_TIMEOUT_MS", raw)),
                }
            }
            None => DEFAULT_VERIFY_TIMEOUT,
        };

        Ok(Self {
            port,
            mode,
            verify_timeout,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be a positive integer, got '{1}'")]
    InvalidNumber(&'static str, String),
    #[error(transparent)]
    Mode(#[from] UnknownDeploymentMode),
}
