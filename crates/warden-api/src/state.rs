//! # Application State
//!
//! Shared, read-only state handed to the middleware stages. Per-request data
//! (the authenticated identity) lives in request extensions, never here.

use std::sync::Arc;

use warden_idp::TokenVerifier;

use crate::auth::AuthGate;
use crate::config::AppConfig;
use crate::responder::ErrorResponder;

#[derive(Debug, Clone)]
pub struct AppState {
    pub gate: AuthGate,
    pub responder: ErrorResponder,
}

impl AppState {
    /// Build state from a verifier and the service configuration.
    pub fn new(verifier: Arc<dyn TokenVerifier>, config: &AppConfig) -> Self {
        Self {
            gate: AuthGate::new(verifier, config.verify_timeout),
            responder: ErrorResponder::new(config.mode),
        }
    }
}
