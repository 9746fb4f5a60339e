//! End-to-end tool dispatch against a mocked service
//!
//! Drives registered tools through the registry the way an MCP client would,
//! with wiremock standing in for the remote deployment. Covers the success
//! envelope, the single-probe health check, and the guarantee that tools for
//! unconfigured services never touch the network.

use std::sync::Arc;

use switchboard::config::{Credential, ServiceConfig};
use switchboard::jira::JiraClient;
use switchboard::mcp::{register_all_tools, ToolContext, ToolRegistry};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn full_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry);
    registry
}

fn jira_context(base_url: &str) -> ToolContext {
    let config = ServiceConfig::new(base_url, Credential::new("integration-token"))
        .expect("valid config");
    ToolContext {
        jira: Some(Arc::new(JiraClient::new(&config).expect("client builds"))),
        ..Default::default()
    }
}

fn envelope(result: &rmcp::model::CallToolResult) -> serde_json::Value {
    let rmcp::model::RawContent::Text(text) = &result.content[0].raw else {
        panic!("expected text content");
    };
    serde_json::from_str(&text.text).expect("envelope is JSON")
}

#[tokio::test]
async fn test_healthcheck_performs_exactly_one_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/myself"))
        .and(header("Authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "svc-switchboard",
            "displayName": "Switchboard Service",
            "emailAddress": "switchboard@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = full_registry();
    let context = jira_context(&server.uri());
    let tool = registry.get_tool("jira_healthcheck").expect("registered");

    let result = tool
        .execute(serde_json::Map::new(), &context)
        .await
        .expect("envelope, not protocol error");

    assert_eq!(result.is_error, Some(false));
    let body = envelope(&result);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["service"], "jira");
    assert_eq!(body["data"]["auth_scheme"], "bearer");
    assert_eq!(body["data"]["user"]["display_name"], "Switchboard Service");
    let message = body["message"].as_str().expect("message is a string");
    assert!(message.contains("Switchboard Service"), "{message}");
}

#[tokio::test]
async fn test_unconfigured_service_tool_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    // Only Jira is configured; the Asana tool must fail before any I/O.
    let registry = full_registry();
    let context = jira_context(&server.uri());
    let tool = registry.get_tool("asana_healthcheck").expect("registered");

    let result = tool
        .execute(serde_json::Map::new(), &context)
        .await
        .expect("envelope, not protocol error");

    assert_eq!(result.is_error, Some(true));
    let body = envelope(&result);
    assert_eq!(body["kind"], "configuration");
}

#[tokio::test]
async fn test_get_issue_returns_mapped_fields_with_sentinels() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/OPS-7"))
        .and(query_param("fields", "*all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "key": "OPS-7",
            "fields": {
                "summary": "Wire up retries",
                "status": { "name": "In Progress" },
                "issuetype": { "name": "Story" },
                "labels": ["backend"]
            }
        })))
        .mount(&server)
        .await;

    let registry = full_registry();
    let context = jira_context(&server.uri());
    let tool = registry.get_tool("jira_get_issue").expect("registered");

    let mut arguments = serde_json::Map::new();
    arguments.insert("issue_key".to_string(), serde_json::json!("OPS-7"));
    let result = tool
        .execute(arguments, &context)
        .await
        .expect("envelope, not protocol error");

    assert_eq!(result.is_error, Some(false));
    let body = envelope(&result);
    assert_eq!(body["message"], "Fetched issue OPS-7: Wire up retries");
    assert_eq!(body["data"]["key"], "OPS-7");
    assert_eq!(body["data"]["status"], "In Progress");
    // Absent fields arrive as sentinels, never as nulls
    assert_eq!(body["data"]["assignee"], "Unassigned");
    assert_eq!(body["data"]["priority"], "Unknown");
}

#[tokio::test]
async fn test_remote_failure_becomes_an_http_envelope_with_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/OPS-404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"errorMessages":["Issue does not exist"]}"#),
        )
        .mount(&server)
        .await;

    let registry = full_registry();
    let context = jira_context(&server.uri());
    let tool = registry.get_tool("jira_get_issue").expect("registered");

    let mut arguments = serde_json::Map::new();
    arguments.insert("issue_key".to_string(), serde_json::json!("OPS-404"));
    let result = tool
        .execute(arguments, &context)
        .await
        .expect("envelope, not protocol error");

    assert_eq!(result.is_error, Some(true));
    let body = envelope(&result);
    assert_eq!(body["kind"], "http");
    assert_eq!(body["resource"], "OPS-404");
    let message = body["message"].as_str().expect("message is a string");
    assert!(message.contains("404"), "{message}");
    assert!(!message.contains("integration-token"), "{message}");
}
