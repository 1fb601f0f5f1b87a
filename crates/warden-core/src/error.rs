//! # Application Error
//!
//! The structured error value raised wherever a failure condition is
//! detected: authentication rejection, missing input, unmatched route.
//!
//! ## Design
//!
//! - The status class is derived from the status code at construction and
//!   can never disagree with it.
//! - Fields are private; an `AppError` is immutable once built.
//! - Operational errors are safe to describe to clients. Non-operational
//!   errors are bugs and are answered with a generic message in production.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Status code substituted when none (or an out-of-range one) is supplied.
pub const DEFAULT_STATUS_CODE: u16 = 500;

/// Status class of an error response.
///
/// `Fail` covers client errors (4xx); everything else is `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    /// Client error (4xx).
    Fail,
    /// Server error, or any non-4xx code.
    Error,
}

impl ErrorStatus {
    /// Derive the status class from an HTTP status code.
    pub fn from_status_code(status_code: u16) -> Self {
        if (400..500).contains(&status_code) {
            Self::Fail
        } else {
            Self::Error
        }
    }

    /// Return the string representation used in response bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured application error.
///
/// Serializes as `{message, statusCode, status, isOperational}`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct AppError {
    message: String,
    status_code: u16,
    status: ErrorStatus,
    is_operational: bool,
}

impl AppError {
    /// Build an operational error with the given status code.
    ///
    /// Codes outside 100–599 are replaced with [`DEFAULT_STATUS_CODE`].
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        let status_code = if (100..=599).contains(&status_code) {
            status_code
        } else {
            DEFAULT_STATUS_CODE
        };
        Self {
            message: message.into(),
            status_code,
            status: ErrorStatus::from_status_code(status_code),
            is_operational: true,
        }
    }

    /// Build a non-operational (programming) error. Always 500.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            is_operational: false,
            ..Self::new(message, DEFAULT_STATUS_CODE)
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, 400)
    }

    /// 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, 401)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, 404)
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, always within 100–599.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Status class derived from the status code.
    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// `true` for anticipated failures whose message is safe to show.
    /// Programming errors are non-operational.
    pub fn is_operational(&self) -> bool {
        self.is_operational
    }
}
