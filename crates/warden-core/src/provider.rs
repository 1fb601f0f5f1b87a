//! # Provider Error Taxonomy
//!
//! Failures originating in external providers (identity provider, data
//! stores behind a provider boundary) arrive as tagged variants rather than
//! loosely shaped values. [`ProviderError::classify`] is the pure mapping
//! applied by the production error responder.
//!
//! | Kind                | Status | Client message                                    |
//! |---------------------|--------|---------------------------------------------------|
//! | `cast`              | 400    | `Invalid {path}: {value}.`                        |
//! | `duplicate_key`     | 400    | `Duplicate field value: {value}. Please use another value!` |
//! | `validation`        | 400    | `Invalid input data. {m1}. {m2}`                  |
//! | `invalid_signature` | 401    | `Invalid token. Please log in again.`             |
//! | `token_expired`     | 401    | `Your token has expired! Please log in again.`    |

use serde::Serialize;
use thiserror::Error;

use crate::error::AppError;

/// Production message for an invalid token signature.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token. Please log in again.";
/// Production message for an expired token.
pub const EXPIRED_TOKEN_MESSAGE: &str = "Your token has expired! Please log in again.";

/// A provider-originated failure, discriminated by kind.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderError {
    /// A value could not be cast to the type a field expects.
    #[error("cast failed for {path}: {value}")]
    Cast {
        /// Field the value was destined for.
        path: String,
        /// The rejected value.
        value: String,
    },

    /// A uniqueness constraint was violated. `detail` is the provider's raw
    /// description, which quotes the offending value.
    #[error("duplicate key: {detail}")]
    DuplicateKey {
        /// Raw provider description.
        detail: String,
    },

    /// One or more fields failed validation.
    #[error("validation failed: {}", messages.join("; "))]
    Validation {
        /// One message per failing field.
        messages: Vec<String>,
    },

    /// The token signature did not verify.
    #[error("invalid token signature: {detail}")]
    InvalidSignature {
        /// Raw provider description.
        detail: String,
    },

    /// The token is past its expiry.
    #[error("token expired: {detail}")]
    TokenExpired {
        /// Raw provider description.
        detail: String,
    },
}

impl ProviderError {
    /// Machine-readable kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cast { .. } => "cast",
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::Validation { .. } => "validation",
            Self::InvalidSignature { .. } => "invalid_signature",
            Self::TokenExpired { .. } => "token_expired",
        }
    }

    /// Reclassify into an operational [`AppError`] with a fixed message.
    pub fn classify(&self) -> AppError {
        match self {
            Self::Cast { path, value } => AppError::bad_request(format!("Invalid {path}: {value}.")),
            Self::DuplicateKey { detail } => AppError::bad_request(format!(
                "Duplicate field value: {}. Please use another value!",
                quoted_value(detail)
            )),
            Self::Validation { messages } => {
                AppError::bad_request(format!("Invalid input data. {}", messages.join(". ")))
            }
            Self::InvalidSignature { .. } => AppError::unauthorized(INVALID_TOKEN_MESSAGE),
            Self::TokenExpired { .. } => AppError::unauthorized(EXPIRED_TOKEN_MESSAGE),
        }
    }
}

/// Extract the first double-quoted segment (quotes included), or the whole
/// detail when nothing is quoted.
fn quoted_value(detail: &str) -> &str {
    let Some(start) = detail.find('"') else {
        return detail;
    };
    match detail[start + 1..].find('"') {
        Some(len) => &detail[start..start + len + 2],
        None => detail,
    }
}
