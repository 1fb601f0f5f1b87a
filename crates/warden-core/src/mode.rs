//! Deployment mode: selects verbose (development) or sanitized
//! (production) error responses.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Which error rendering the responder applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Full error structure and trace in responses. Never expose to real clients.
    Development,
    /// Sanitized responses. The default when nothing is configured.
    #[default]
    Production,
}

impl DeploymentMode {
    /// Lowercase name, as accepted by `APP_ENV`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for an unrecognized mode name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown deployment mode '{0}', expected 'development' or 'production'")]
pub struct UnknownDeploymentMode(pub String);

impl FromStr for DeploymentMode {
    type Err = UnknownDeploymentMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            _ => Err(UnknownDeploymentMode(s.to_string())),
        }
    }
}
