//! # Authentication Middleware (Auth Gate)
//!
//! Bearer-token gate in front of the protected routes.
//!
//! ## Flow
//!
//! ```text
//! Authorization: Bearer <credential>
//!   missing / other scheme   → 401 "Missing or invalid authorization token"
//!   verifier → Ok(Some(id))  → identity inserted into extensions → next stage
//!   verifier → Ok(None)      → 401 "Invalid authorization token"
//!   verifier → Err(e)        → e logged, 401 "Invalid authorization token"
//!                              (warn for rejected credentials, error for
//!                              provider failures)
//!   verifier timed out       → 503 "Identity provider unavailable"
//! ```
//!
//! Rejections are answered here directly; the route handler never runs.
//! Verification failures are terminal for the request and never retried.
//!
//! ## CurrentUser
//!
//! Handlers read the attached identity through the [`CurrentUser`]
//! extractor, which fails with a 401 [`ApiError`] when the gate did not run.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_core::{AppError, Identity};
use warden_idp::TokenVerifier;

use crate::error::ApiError;

pub const MISSING_TOKEN_MESSAGE: &str = "Missing or invalid authorization token";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid authorization token";
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str = "Identity provider unavailable";
pub const NOT_AUTHENTICATED_MESSAGE: &str = "User not authenticated";

const BEARER_PREFIX: &str = "Bearer ";

/// Auth Gate rejection body: `{error, message}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthRejection {
    pub error: String,
    pub message: String,
}

/// Verifier handle plus the bounded wait applied to each verification.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn TokenVerifier>,
    timeout: Duration,
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>, timeout: Duration) -> Self {
        Self { verifier, timeout }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("verifier", &self.verifier.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Extract the credential after the literal `Bearer ` prefix.
fn bearer_credential(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
}

/// Verify the bearer credential and attach the resulting identity.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(credential) = bearer_credential(&request) else {
        tracing::warn!("authentication failed: missing or non-Bearer authorization header");
        return unauthorized_response(MISSING_TOKEN_MESSAGE);
    };

    let verification = tokio::time::timeout(gate.timeout, gate.verifier.verify(credential)).await;

    match verification {
        Ok(Ok(Some(identity))) if identity.is_complete() => {
            tracing::debug!(uid = %identity.uid, "authenticated");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Ok(Ok(_)) => {
            tracing::warn!(
                verifier = gate.verifier.name(),
                "authentication failed: verifier returned no identity"
            );
            unauthorized_response(INVALID_TOKEN_MESSAGE)
        }
        Ok(Err(err)) if err.is_credential_failure() => {
            tracing::warn!(
                verifier = gate.verifier.name(),
                reason = %err,
                "authentication failed: credential rejected"
            );
            unauthorized_response(INVALID_TOKEN_MESSAGE)
        }
        Ok(Err(err)) => {
            tracing::error!(
                verifier = gate.verifier.name(),
                reason = %err,
                "authentication failed: identity provider error"
            );
            unauthorized_response(INVALID_TOKEN_MESSAGE)
        }
        Err(_) => {
            tracing::error!(
                verifier = gate.verifier.name(),
                timeout = ?gate.timeout,
                "token verification timed out"
            );
            rejection(
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                PROVIDER_UNAVAILABLE_MESSAGE,
            )
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    rejection(StatusCode::UNAUTHORIZED, "Unauthorized", message)
}

fn rejection(status: StatusCode, error: &str, message: &str) -> Response {
    let body = AuthRejection {
        error: error.to_string(),
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

/// The identity attached by the Auth Gate.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthorized(NOT_AUTHENTICATED_MESSAGE).into())
    }
}
