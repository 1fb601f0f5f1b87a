//! Token verification error types.

/// Errors from verifying a bearer credential.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The token is past its expiry.
    #[error("token expired: {0}")]
    Expired(String),
    /// The token signature did not verify.
    #[error("invalid token signature: {0}")]
    InvalidSignature(String),
    /// The provider rejected the token for another reason (malformed, revoked).
    #[error("token rejected ({code}): {description}")]
    Rejected { code: String, description: String },
    /// The token was issued for a different project.
    #[error("token audience '{found}' does not match project '{expected}'")]
    AudienceMismatch { expected: String, found: String },
    /// The provider returned an unexpected status.
    #[error("identity provider returned {status}: {body}")]
    Upstream { status: u16, body: String },
    /// HTTP transport error.
    #[error("HTTP error calling identity provider: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider's response could not be decoded.
    #[error("failed to decode identity provider response: {0}")]
    Decode(String),
}

impl VerifyError {
    /// Whether the failure is about the credential itself, as opposed to the
    /// provider being unreachable or misbehaving.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::Expired(_)
                | Self::InvalidSignature(_)
                | Self::Rejected { .. }
                | Self::AudienceMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_are_distinguished_from_provider_failures() {
        assert!(VerifyError::Rejected {
            code: "invalid_token".into(),
            description: "revoked".into(),
        }
        .is_credential_failure());
        assert!(VerifyError::Expired("exp".into()).is_credential_failure());
        assert!(!VerifyError::Decode("x".into()).is_credential_failure());
        assert!(!VerifyError::Upstream {
            status: 502,
            body: String::new(),
        }
        .is_credential_failure());
    }

    #[test]
    fn display_messages() {
        let err = VerifyError::AudienceMismatch {
            expected: "proj-a".into(),
            found: "proj-b".into(),
        };
        assert!(err.to_string().contains("proj-a"));
        assert!(err.to_string().contains("proj-b"));
    }
}
