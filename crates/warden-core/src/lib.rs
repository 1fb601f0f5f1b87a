#![deny(missing_docs)]

//! # warden-core — Foundational Types for the Warden API
//!
//! Defines the values that flow through the request lifecycle pipeline
//! without depending on any HTTP framework:
//!
//! - [`AppError`]: the structured application error (message, status code,
//!   derived status class, operational flag).
//! - [`ProviderError`]: tagged provider-originated failures and their
//!   reclassification into [`AppError`]s.
//! - [`Identity`]: the decoded identity produced by a successful token
//!   verification.
//! - [`DeploymentMode`]: selects verbose or sanitized error responses.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `warden-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod mode;
pub mod provider;

pub use error::{AppError, ErrorStatus};
pub use identity::Identity;
pub use mode::{DeploymentMode, UnknownDeploymentMode};
pub use provider::ProviderError;
