//! # API Route Modules
//!
//! - `profile`: protected profile read/update stubs (no persistence).
//! - public routes: greeting and health probes, defined here.
//! - fallback: every unmatched path becomes a 404 [`AppError`].

pub mod profile;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use warden_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

pub const GREETING: &str = "Hello from the warden API";

/// Success envelope: `{status: "success", data}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// Unauthenticated routes.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(greeting))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

/// GET /: plain greeting.
async fn greeting() -> &'static str {
    GREETING
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("Can't find {} on this server!", uri.path())).into()
}
