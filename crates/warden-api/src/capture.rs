//! # Handler Failure Capture
//!
//! Wraps every routed handler so that each request has exactly one terminal
//! outcome:
//!
//! - the handler's own response, or
//! - one forwarded [`ApiError`], either returned by the handler as `Err` or
//!   produced here from a panic while polling the handler future.
//!
//! A panicking handler never takes down the connection task; the panic is
//! turned into an unexpected error for the responder to render.

use std::panic::AssertUnwindSafe;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;

use crate::error::ApiError;

/// Middleware that converts handler panics into forwarded errors.
pub async fn capture_failures(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let err = ApiError::from_panic(payload);
            tracing::error!(%method, %path, error = %err, "handler panicked");
            err.into_response()
        }
    }
}
