//! # Global Error Responder
//!
//! Terminal stage for every forwarded [`ApiError`]. Sits at the outermost
//! layer of the router: after the inner stages complete or fail, it takes
//! the [`ForwardedError`] off the response (if any) and renders it.
//!
//! ## Rendering
//!
//! | Mode          | Body                                                      |
//! |---------------|-----------------------------------------------------------|
//! | development   | `{status, error, message, stack}` with the original code  |
//! | production    | provider errors reclassified; operational → `{status, message}`; otherwise 500 `Something went wrong` |
//!
//! The deployment mode is injected at construction so it can differ per
//! router instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use warden_core::{AppError, DeploymentMode};

use crate::error::{ApiError, DevErrorBody, ErrorBody, ForwardedError};

/// Generic message returned for non-operational errors in production.
pub const GENERIC_MESSAGE: &str = "Something went wrong";

/// Renders forwarded errors for one deployment mode.
#[derive(Debug, Clone)]
pub struct ErrorResponder {
    mode: DeploymentMode,
    rendered: Arc<AtomicU64>,
}

impl ErrorResponder {
    pub fn new(mode: DeploymentMode) -> Self {
        Self {
            mode,
            rendered: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of errors rendered so far.
    pub fn rendered(&self) -> u64 {
        self.rendered.load(Ordering::Relaxed)
    }

    /// Render `err` as a client response.
    pub fn respond(&self, err: &ApiError) -> Response {
        self.rendered.fetch_add(1, Ordering::Relaxed);
        match self.mode {
            DeploymentMode::Development => develop(err),
            DeploymentMode::Production => produce(err),
        }
    }
}

fn develop(err: &ApiError) -> Response {
    tracing::debug!(error = %err, "rendering error with full detail");
    let body = DevErrorBody {
        status: err.status(),
        error: err,
        message: err.to_string(),
        stack: err.stack(),
    };
    (err.status_code(), Json(body)).into_response()
}

fn produce(err: &ApiError) -> Response {
    let resolved = match err {
        ApiError::Application(app) => app.clone(),
        ApiError::Provider(provider) => provider.classify(),
        ApiError::Unexpected { message, .. } => AppError::unexpected(message.clone()),
    };

    if !resolved.is_operational() {
        tracing::error!(error = %err, stack = %err.stack(), "unexpected error");
        let body = ErrorBody {
            status: "error".to_string(),
            message: GENERIC_MESSAGE.to_string(),
        };
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    let status = StatusCode::from_u16(resolved.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorBody {
        status: resolved.status().to_string(),
        message: resolved.message().to_string(),
    };
    (status, Json(body)).into_response()
}

/// Outermost middleware: renders any error forwarded by the inner stages.
pub async fn respond_to_errors(
    State(responder): State<ErrorResponder>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<ForwardedError>() {
        Some(ForwardedError(err)) => responder.respond(&err),
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use warden_core::ProviderError;

    async fn render(mode: DeploymentMode, err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = ErrorResponder::new(mode).respond(&err);
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn bug() -> ApiError {
        ApiError::Unexpected {
            message: "index out of bounds".into(),
            chain: vec!["vec len 0".into()],
        }
    }

    #[tokio::test]
    async fn production_operational_error_shows_status_and_message() {
        let (status, body) = render(
            DeploymentMode::Production,
            AppError::bad_request("Name and email are required").into(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"status": "fail", "message": "Name and email are required"})
        );
    }

    #[tokio::test]
    async fn production_hides_unexpected_errors() {
        let (status, body) = render(DeploymentMode::Production, bug()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({"status": "error", "message": GENERIC_MESSAGE})
        );
    }

    #[tokio::test]
    async fn production_hides_non_operational_application_errors() {
        let (status, body) = render(
            DeploymentMode::Production,
            AppError::unexpected("invariant broken: uid empty").into(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], GENERIC_MESSAGE);
        assert!(body.get("stack").is_none());
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn development_exposes_full_structure_and_stack() {
        let (status, body) = render(DeploymentMode::Development, bug()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "index out of bounds");
        assert_eq!(body["error"]["origin"], "unexpected");
        assert_eq!(body["error"]["chain"][0], "vec len 0");
        assert!(body["stack"].as_str().unwrap().contains("caused by: vec len 0"));
    }

    #[tokio::test]
    async fn development_keeps_application_status() {
        let (status, body) = render(
            DeploymentMode::Development,
            AppError::not_found("Can't find /x on this server!").into(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["error"]["statusCode"], 404);
        assert_eq!(body["error"]["isOperational"], true);
    }

    #[tokio::test]
    async fn development_does_not_reclassify_provider_errors() {
        let (status, body) = render(
            DeploymentMode::Development,
            ProviderError::TokenExpired {
                detail: "exp".into(),
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["kind"], "token_expired");
    }

    #[tokio::test]
    async fn production_reclassifies_provider_errors() {
        let cases = [
            (
                ProviderError::Cast {
                    path: "_id".into(),
                    value: "xyz".into(),
                },
                StatusCode::BAD_REQUEST,
                "Invalid _id: xyz.",
            ),
            (
                ProviderError::DuplicateKey {
                    detail: r#"dup key: { email: "ann@x.com" }"#.into(),
                },
                StatusCode::BAD_REQUEST,
                r#"Duplicate field value: "ann@x.com". Please use another value!"#,
            ),
            (
                ProviderError::Validation {
                    messages: vec!["a".into(), "b".into()],
                },
                StatusCode::BAD_REQUEST,
                "Invalid input data. a. b",
            ),
            (
                ProviderError::InvalidSignature {
                    detail: "sig".into(),
                },
                StatusCode::UNAUTHORIZED,
                "Invalid token. Please log in again.",
            ),
            (
                ProviderError::TokenExpired {
                    detail: "exp".into(),
                },
                StatusCode::UNAUTHORIZED,
                "Your token has expired! Please log in again.",
            ),
        ];

        for (provider, expected_status, expected_message) in cases {
            let (status, body) = render(DeploymentMode::Production, provider.into()).await;
            assert_eq!(status, expected_status);
            assert_eq!(body["status"], "fail");
            assert_eq!(body["message"], expected_message);
        }
    }

    #[test]
    fn counts_rendered_errors() {
        let responder = ErrorResponder::new(DeploymentMode::Production);
        let clone = responder.clone();
        let _ = responder.respond(&bug());
        let _ = clone.respond(&bug());
        assert_eq!(responder.rendered(), 2);
    }
}
