//! Static token verifier: a fixed table of credentials for local
//! development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use warden_core::Identity;

use crate::error::VerifyError;
use crate::TokenVerifier;

/// Verifier that accepts only the credentials it was built with.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as `identity`.
    pub fn with_token(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, credential: &str) -> Result<Option<Identity>, VerifyError> {
        self.tokens
            .get(credential)
            .cloned()
            .map(Some)
            .ok_or_else(|| VerifyError::Rejected {
                code: "invalid_token".to_string(),
                description: "unknown token".to_string(),
            })
    }

    fn name(&self) -> &str {
        "static"
    }
}
