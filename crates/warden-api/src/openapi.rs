//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warden API",
        version = "0.1.0",
        description = "Bearer-token gated profile API with centralized error normalization.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::profile::get_profile,
        crate::routes::profile::get_profile_details,
        crate::routes::profile::update_profile,
    ),
    components(schemas(
        crate::routes::profile::UpdateProfileRequest,
        crate::routes::profile::UpdatedUser,
        crate::auth::AuthRejection,
        crate::error::ErrorBody,
    )),
    modifiers(&BearerAuth),
    tags((name = "profile", description = "Authenticated profile endpoints"))
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Router serving the spec.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
