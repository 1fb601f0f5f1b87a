//! # warden-idp — Token Verification Capability
//!
//! The Auth Gate delegates bearer-credential verification to a
//! [`TokenVerifier`]. This crate defines that contract and ships two
//! implementations:
//!
//! - [`HttpTokenVerifier`]: posts the credential to the identity provider's
//!   verification endpoint and decodes the returned claims.
//! - [`StaticTokenVerifier`]: a fixed token → identity table for local
//!   development and tests.
//!
//! ## Contract
//!
//! `verify(credential)` resolves to:
//! - `Ok(Some(identity))`: the credential is valid and names a subject.
//! - `Ok(None)`: the provider accepted the call but produced no identity.
//! - `Err(VerifyError)`: the credential is malformed, expired, revoked,
//!   or the provider could not be reached. Never retried by callers.

pub mod config;
pub mod error;
pub mod fixed;
pub mod http;

pub use config::{IdpConfig, IdpConfigError, PrivateKey};
pub use error::VerifyError;
pub use fixed::StaticTokenVerifier;
pub use http::HttpTokenVerifier;

use async_trait::async_trait;
use warden_core::Identity;

/// Verifies a bearer credential against an identity provider.
///
/// Object-safe so it can live behind an `Arc<dyn TokenVerifier>` in shared
/// application state.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `credential` and return the identity it decodes to.
    async fn verify(&self, credential: &str) -> Result<Option<Identity>, VerifyError>;

    /// Human-readable name of the backend, used in logs.
    fn name(&self) -> &str;
}
