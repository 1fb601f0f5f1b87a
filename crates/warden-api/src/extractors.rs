//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! and validate JSON bodies in handlers.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use warden_core::AppError;

use crate::error::ApiError;

/// Request types that check business rules beyond what serde enforces,
/// producing a validated value.
pub trait Validate: Sized {
    /// The validated form of the request.
    type Valid;

    /// Validate business rules. Returns a client-facing message on failure.
    fn validate(self) -> Result<Self::Valid, String>;
}

/// Extract a JSON body, mapping rejections to an operational error that
/// keeps the rejection's status code.
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., ApiError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::new(err.body_text(), err.status().as_u16()).into())
}

/// Extract a JSON body and validate it. Validation failures are 400.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T::Valid, ApiError> {
    let value = extract_json(result)?;
    value
        .validate()
        .map_err(|message| AppError::bad_request(message).into())
}
