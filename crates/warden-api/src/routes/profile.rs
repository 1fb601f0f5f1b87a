//! # Profile Routes
//!
//! Protected endpoints over the authenticated identity. Nothing is
//! persisted: reads echo the identity, the update echoes the new shape.

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_core::Identity;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::Envelope;
use crate::state::AppState;

pub const FIELDS_REQUIRED_MESSAGE: &str = "Name and email are required";

/// Profile update request. Both fields are required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Updated profile as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedUser {
    pub uid: String,
    pub name: String,
    pub email: String,
}

/// Validated update fields.
#[derive(Debug)]
pub struct ProfileFields {
    pub name: String,
    pub email: String,
}

impl Validate for UpdateProfileRequest {
    type Valid = ProfileFields;

    fn validate(self) -> Result<ProfileFields, String> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (present(self.name), present(self.email)) {
            (Some(name), Some(email)) => Ok(ProfileFields { name, email }),
            _ => Err(FIELDS_REQUIRED_MESSAGE.to_string()),
        }
    }
}

/// `GET /profile/` body.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub user: Identity,
}

#[derive(Debug, Serialize)]
pub struct UserData<T> {
    pub user: T,
}

/// Build the profile router. The Auth Gate is layered on by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/", get(get_profile))
        .route("/profile/details", get(get_profile_details))
        .route("/profile/update", put(update_profile))
}

/// GET /profile/: echo the authenticated identity.
#[utoipa::path(
    get,
    path = "/profile/",
    responses(
        (status = 200, description = "Authenticated identity"),
        (status = 401, description = "Missing or invalid token", body = crate::auth::AuthRejection),
    ),
    security(("bearer" = [])),
    tag = "profile"
)]
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile retrieved successfully",
        user,
    })
}

/// GET /profile/details: identity in the success envelope.
#[utoipa::path(
    get,
    path = "/profile/details",
    responses(
        (status = 200, description = "Authenticated identity in the success envelope"),
        (status = 401, description = "Missing or invalid token", body = crate::auth::AuthRejection),
    ),
    security(("bearer" = [])),
    tag = "profile"
)]
pub async fn get_profile_details(
    CurrentUser(user): CurrentUser,
) -> Json<Envelope<UserData<Identity>>> {
    Json(Envelope::success(UserData { user }))
}

/// PUT /profile/update: validate and echo the updated profile.
#[utoipa::path(
    put,
    path = "/profile/update",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile in the success envelope"),
        (status = 400, description = "Name or email missing", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::auth::AuthRejection),
    ),
    security(("bearer" = [])),
    tag = "profile"
)]
pub async fn update_profile(
    CurrentUser(user): CurrentUser,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<Envelope<UserData<UpdatedUser>>>, ApiError> {
    let fields = extract_validated_json(body)?;
    tracing::info!(uid = %user.uid, "profile update accepted");
    Ok(Json(Envelope::success(UserData {
        user: UpdatedUser {
            uid: user.uid,
            name: fields.name,
            email: fields.email,
        },
    })))
}
