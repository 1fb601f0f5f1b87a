//! # HTTP Token Verifier
//!
//! Verifies bearer credentials by posting them to the identity provider.
//!
//! ## Wire Contract
//!
//! ```text
//! POST {IDP_VERIFY_URL}
//! Authorization: Basic base64(client_email:private_key)
//! {"token": "<credential>", "projectId": "<project id>"}
//! ```
//!
//! | Response                                   | Result                          |
//! |--------------------------------------------|---------------------------------|
//! | 200 claims object                          | `Ok(Some(identity))` / `Ok(None)` |
//! | 400/401 `{"error":"token_expired"}`        | `VerifyError::Expired`          |
//! | 400/401 `{"error":"invalid_signature"}`    | `VerifyError::InvalidSignature` |
//! | 400/401 any other error code               | `VerifyError::Rejected`         |
//! | anything else                              | `VerifyError::Upstream`         |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use warden_core::Identity;

use crate::config::IdpConfig;
use crate::error::VerifyError;
use crate::TokenVerifier;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    token: &'a str,
    project_id: &'a str,
}

/// OAuth-style error body returned on rejection.
#[derive(Debug, Default, Deserialize)]
struct Rejection {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Token verifier backed by the identity provider's HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenVerifier {
    http: reqwest::Client,
    config: IdpConfig,
}

impl HttpTokenVerifier {
    /// Create a verifier from configuration.
    pub fn new(config: IdpConfig) -> Result<Self, VerifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn identity_from(&self, mut claims: Map<String, Value>) -> Result<Option<Identity>, VerifyError> {
        if let Some(aud) = claims.remove("aud") {
            let found = match aud {
                Value::String(s) => s,
                other => other.to_string(),
            };
            if found != self.config.project_id {
                return Err(VerifyError::AudienceMismatch {
                    expected: self.config.project_id.clone(),
                    found,
                });
            }
        }
        Ok(Identity::from_claims(claims))
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify(&self, credential: &str) -> Result<Option<Identity>, VerifyError> {
        let response = self
            .http
            .post(self.config.verify_url.clone())
            .basic_auth(
                &self.config.client_email,
                Some(self.config.private_key.expose()),
            )
            .json(&VerifyRequest {
                token: credential,
                project_id: &self.config.project_id,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let claims: Map<String, Value> = response
                .json()
                .await
                .map_err(|e| VerifyError::Decode(e.to_string()))?;
            return self.identity_from(claims);
        }

        let body = response.text().await?;
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            let rejection: Rejection = serde_json::from_str(&body).unwrap_or_default();
            let description = rejection
                .error_description
                .unwrap_or_else(|| rejection.error.clone());
            tracing::debug!(code = %rejection.error, "identity provider rejected token");
            return Err(match rejection.error.as_str() {
                "token_expired" => VerifyError::Expired(description),
                "invalid_signature" => VerifyError::InvalidSignature(description),
                _ => VerifyError::Rejected {
                    code: rejection.error,
                    description,
                },
            });
        }

        Err(VerifyError::Upstream {
            status: status.as_u16(),
            body,
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}
