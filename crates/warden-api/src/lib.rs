//! # warden-api — Axum API Service
//!
//! HTTP surface of the warden service: a bearer-token Auth Gate in front of
//! the profile routes, with every failure funnelled into one global error
//! responder.
//!
//! ## API Surface
//!
//! | Route                  | Auth      | Module                    |
//! |------------------------|-----------|---------------------------|
//! | `GET /`                | none      | [`routes`]                |
//! | `GET /health/*`        | none      | [`routes`]                |
//! | `GET /openapi.json`    | none      | [`openapi`]               |
//! | `GET /profile/`        | bearer    | [`routes::profile`]       |
//! | `GET /profile/details` | bearer    | [`routes::profile`]       |
//! | `PUT /profile/update`  | bearer    | [`routes::profile`]       |
//! | anything else          | none      | 404 fallback              |
//!
//! A known path requested with an unsupported method gets the same 404.
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → ErrorResponder → FailureCapture → AuthGate (protected routes) → Handler
//! ```

pub mod auth;
pub mod capture;
pub mod config;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod responder;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full application router with all routes and middleware.
///
/// The Auth Gate is a route layer on the profile router only, so public
/// routes and the 404 fallback never require credentials.
pub fn app(state: AppState) -> Router {
    let protected = routes::profile::router().route_layer(from_fn_with_state(
        state.gate.clone(),
        auth::auth_middleware,
    ));

    Router::new()
        .merge(routes::public_router())
        .merge(openapi::router())
        .merge(protected)
        .method_not_allowed_fallback(routes::not_found)
        .fallback(routes::not_found)
        .layer(from_fn(capture::capture_failures))
        .layer(from_fn_with_state(
            state.responder.clone(),
            responder::respond_to_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
