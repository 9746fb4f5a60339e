//! Transport error classification against a live HTTP endpoint
//!
//! Every failure a remote service can produce must land in exactly one
//! error variant, and no variant may carry the credential.

use std::time::Duration;

use switchboard::config::{Credential, ServiceConfig};
use switchboard::jira::JiraClient;
use switchboard::SwitchboardError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base_url: &str, credential: &str) -> JiraClient {
    let config =
        ServiceConfig::new(base_url, Credential::new(credential)).expect("valid config");
    JiraClient::new(&config).expect("client builds")
}

fn client_with_timeout(base_url: &str, timeout: Duration) -> JiraClient {
    let config = ServiceConfig::new(base_url, Credential::new("token"))
        .expect("valid config")
        .with_timeout(timeout);
    JiraClient::new(&config).expect("client builds")
}

#[tokio::test]
async fn test_http_status_is_classified_as_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/myself"))
        .respond_with(ResponseTemplate::new(401).set_body_string("auth required"))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), "token");
    let err = client.probe().await.unwrap_err();

    assert_eq!(err.kind(), "http");
    match err {
        SwitchboardError::Http { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("auth required"));
        }
        other => panic!("expected Http, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_response_is_classified_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/myself"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_with_timeout(&server.uri(), Duration::from_millis(250));
    let err = client.probe().await.unwrap_err();

    assert_eq!(err.kind(), "timeout");
    assert!(matches!(err, SwitchboardError::Timeout { .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_classified_as_connection() {
    // Take a port, then free it so the connect is refused.
    let base_url = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = client_for(&base_url, "token");
    let err = client.probe().await.unwrap_err();

    assert_eq!(err.kind(), "connection");
    assert!(matches!(err, SwitchboardError::Connection(_)));
}

#[tokio::test]
async fn test_non_json_body_is_classified_as_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/myself"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>maintenance window</html>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), "token");
    let err = client.probe().await.unwrap_err();

    assert_eq!(err.kind(), "malformed_response");
    assert!(matches!(err, SwitchboardError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_missing_required_key_is_classified_as_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/OPS-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "fields": { "summary": "no key present" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), "token");
    let err = client.get_issue("OPS-7").await.unwrap_err();

    assert_eq!(err.kind(), "malformed_response");
}

#[tokio::test]
async fn test_error_messages_never_carry_the_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/myself"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let secret = "super-secret-9000";
    let client = client_for(&server.uri(), secret);
    let err = client.probe().await.unwrap_err();

    assert!(!err.to_string().contains(secret));
    assert!(!format!("{err:?}").contains(secret));
}
