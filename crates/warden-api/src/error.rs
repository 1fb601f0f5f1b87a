//! # API Error Types
//!
//! [`ApiError`] is the single value every failing stage hands to the global
//! error responder. Its `IntoResponse` impl does not render a body: it
//! attaches the error to the response as a [`ForwardedError`] extension,
//! which the responder layer takes and renders according to the deployment
//! mode. A handler can therefore return `Result<_, ApiError>` and `?` its way
//! out without knowing how the error will be shown.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_core::{AppError, ErrorStatus, ProviderError};

/// Sanitized error body: `{status, message}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// `fail` for client errors, `error` otherwise.
    pub status: String,
    pub message: String,
}

/// Development error body: the sanitized fields plus the full error
/// structure and a trace.
#[derive(Debug, Serialize)]
pub struct DevErrorBody<'a> {
    pub status: ErrorStatus,
    pub error: &'a ApiError,
    pub message: String,
    pub stack: String,
}

/// Any error propagated to the global error responder.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum ApiError {
    /// Raised deliberately by the pipeline or a handler.
    #[error(transparent)]
    Application(AppError),

    /// Raised by an external provider. Carries no status code of its own.
    #[error(transparent)]
    Provider(ProviderError),

    /// Anything else: a bug, a panic, an unclassified library error.
    #[error("{message}")]
    Unexpected { message: String, chain: Vec<String> },
}

impl ApiError {
    /// Capture an arbitrary error and its source chain as unexpected.
    pub fn unexpected(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self::Unexpected {
            message: err.to_string(),
            chain,
        }
    }

    /// Convert a panic payload into an unexpected error.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Unexpected {
            message: format!("handler panicked: {detail}"),
            chain: Vec::new(),
        }
    }

    /// Status code, defaulting to 500 when the error carries none.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Provider(_) | Self::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Status class, defaulting to `error` when the error carries none.
    pub fn status(&self) -> ErrorStatus {
        match self {
            Self::Application(err) => err.status(),
            Self::Provider(_) | Self::Unexpected { .. } => ErrorStatus::Error,
        }
    }

    fn kind(&self) -> String {
        match self {
            Self::Application(_) => "AppError".to_string(),
            Self::Provider(err) => format!("ProviderError({})", err.kind()),
            Self::Unexpected { .. } => "UnexpectedError".to_string(),
        }
    }

    /// Trace representation: kind and message, then one line per cause.
    pub fn stack(&self) -> String {
        let mut stack = format!("{}: {}", self.kind(), self);
        if let Self::Unexpected { chain, .. } = self {
            for cause in chain {
                stack.push_str("\n    caused by: ");
                stack.push_str(cause);
            }
        }
        stack
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::Application(err)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

/// Response extension carrying an error to the responder layer.
#[derive(Clone)]
pub struct ForwardedError(pub Arc<ApiError>);

impl fmt::Debug for ForwardedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ForwardedError").field(&self.0).finish()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status_code().into_response();
        response
            .extensions_mut()
            .insert(ForwardedError(Arc::new(self)));
        response
    }
}
