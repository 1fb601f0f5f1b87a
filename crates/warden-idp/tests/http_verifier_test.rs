//! Contract tests for HttpTokenVerifier against a mock identity provider.
//!
//! | Provider response                         | Expected result                 |
//! |-------------------------------------------|---------------------------------|
//! | 200 claims with uid                       | `Ok(Some(identity))`            |
//! | 200 claims without subject                | `Ok(None)`                      |
//! | 200 claims for another project            | `AudienceMismatch`              |
//! | 401 `token_expired`                       | `Expired`                       |
//! | 401 `invalid_signature`                   | `InvalidSignature`              |
//! | 401 other code                            | `Rejected`                      |
//! | 503                                       | `Upstream`                      |

use warden_idp::{HttpTokenVerifier, IdpConfig, PrivateKey, TokenVerifier, VerifyError};
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VERIFY_PATH: &str = "/v1/tokens:verify";

fn test_verifier(mock_server: &MockServer) -> HttpTokenVerifier {
    let config = IdpConfig {
        verify_url: format!("{}{VERIFY_PATH}", mock_server.uri()).parse().unwrap(),
        project_id: "warden-test".into(),
        client_email: "svc@warden-test.example.com".into(),
        private_key: PrivateKey::new("test-key"),
        timeout_secs: 5,
    };
    HttpTokenVerifier::new(config).unwrap()
}

#[tokio::test]
async fn valid_token_returns_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .and(header_exists("authorization"))
        .and(body_json(serde_json::json!({
            "token": "good-token",
            "projectId": "warden-test"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uid": "u1",
            "aud": "warden-test",
            "name": "Ann",
            "email": "ann@x.com",
            "email_verified": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let verifier = test_verifier(&mock_server);
    let identity = verifier.verify("good-token").await.unwrap().unwrap();
    assert_eq!(identity.uid, "u1");
    assert_eq!(identity.name.as_deref(), Some("Ann"));
    assert_eq!(identity.email.as_deref(), Some("ann@x.com"));
    assert_eq!(identity.claims["email_verified"], true);
    assert!(!identity.claims.contains_key("aud"));
}

#[tokio::test]
async fn sub_claim_is_accepted_as_subject() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"sub": "subject-9"})),
        )
        .mount(&mock_server)
        .await;

    let identity = test_verifier(&mock_server)
        .verify("t")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(identity.uid, "subject-9");
}

#[tokio::test]
async fn claims_without_subject_yield_no_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"email": "a@b.c"})),
        )
        .mount(&mock_server)
        .await;

    let result = test_verifier(&mock_server).verify("t").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn foreign_audience_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uid": "u1",
            "aud": "someone-else"
        })))
        .mount(&mock_server)
        .await;

    let err = test_verifier(&mock_server).verify("t").await.unwrap_err();
    match err {
        VerifyError::AudienceMismatch { expected, found } => {
            assert_eq!(expected, "warden-test");
            assert_eq!(found, "someone-else");
        }
        other => panic!("expected AudienceMismatch, got: {other:?}"),
    }
}

#[tokio::test]
async fn expired_token_maps_to_expired() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "token_expired",
            "error_description": "token expired at 1700000000"
        })))
        .mount(&mock_server)
        .await;

    let err = test_verifier(&mock_server).verify("old").await.unwrap_err();
    match &err {
        VerifyError::Expired(detail) => assert!(detail.contains("1700000000")),
        other => panic!("expected Expired, got: {other:?}"),
    }
    assert!(err.is_credential_failure());
}

#[tokio::test]
async fn bad_signature_maps_to_invalid_signature() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_signature"
        })))
        .mount(&mock_server)
        .await;

    let err = test_verifier(&mock_server).verify("forged").await.unwrap_err();
    assert!(matches!(err, VerifyError::InvalidSignature(_)));
}

#[tokio::test]
async fn other_rejection_codes_map_to_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "token_revoked",
            "error_description": "revoked by admin"
        })))
        .mount(&mock_server)
        .await;

    let err = test_verifier(&mock_server).verify("revoked").await.unwrap_err();
    match err {
        VerifyError::Rejected { code, description } => {
            assert_eq!(code, "token_revoked");
            assert_eq!(description, "revoked by admin");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = test_verifier(&mock_server).verify("t").await.unwrap_err();
    match err {
        VerifyError::Upstream { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Upstream, got: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_provider_maps_to_http_error() {
    let config = IdpConfig {
        verify_url: "http://127.0.0.1:1/verify".parse().unwrap(),
        project_id: "warden-test".into(),
        client_email: "svc@warden-test.example.com".into(),
        private_key: PrivateKey::new("test-key"),
        timeout_secs: 1,
    };
    let err = HttpTokenVerifier::new(config)
        .unwrap()
        .verify("t")
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::Http(_)));
    assert!(!err.is_credential_failure());
}
