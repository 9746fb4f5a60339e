//! Response envelope builders for MCP tools
//!
//! Every tool reply is a JSON envelope inside a single text content block.
//! Success envelopes carry the mapped payload under `data`; error envelopes
//! carry the error kind from [`SwitchboardError::kind`] so callers can branch
//! on the failure class without parsing prose.

use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent};
use rmcp::Error as McpError;
use serde::Serialize;

use crate::error::SwitchboardError;

/// Build a success envelope for a completed operation.
///
/// The payload is serialized under `data`; serialization failure is a
/// protocol-level error because it means the tool built an unrepresentable
/// value, not that the remote service misbehaved.
pub fn success_response<T: Serialize>(
    operation: &str,
    message: impl Into<String>,
    payload: &T,
) -> std::result::Result<CallToolResult, McpError> {
    let data = serde_json::to_value(payload).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize response data: {e}"), None)
    })?;

    let envelope = serde_json::json!({
        "status": "success",
        "operation": operation,
        "message": message.into(),
        "data": data,
    });

    Ok(text_result(&envelope, false))
}

/// Build an error envelope from a classified adapter error.
///
/// The envelope is a normal tool result with `is_error` set; only argument
/// parsing and serialization failures surface as protocol errors.
pub fn error_response(
    operation: &str,
    resource: Option<&str>,
    error: &SwitchboardError,
) -> CallToolResult {
    // Caller mistakes are expected traffic; transport failures are not
    if error.is_caller_error() {
        tracing::debug!("MCP operation '{}' rejected: {}", operation, error);
    } else {
        tracing::warn!("MCP operation '{}' failed: {}", operation, error);
    }

    let mut envelope = serde_json::json!({
        "status": "error",
        "kind": error.kind(),
        "operation": operation,
        "message": error.to_string(),
    });

    if let Some(resource) = resource {
        envelope["resource"] = serde_json::Value::String(resource.to_string());
    }

    text_result(&envelope, true)
}

fn text_result(envelope: &serde_json::Value, is_error: bool) -> CallToolResult {
    let text =
        serde_json::to_string_pretty(envelope).unwrap_or_else(|_| envelope.to_string());

    CallToolResult {
        content: vec![Annotated::new(
            RawContent::Text(RawTextContent { text }),
            None,
        )],
        is_error: Some(is_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_of(result: &CallToolResult) -> serde_json::Value {
        let RawContent::Text(text) = &result.content[0].raw else {
            panic!("expected text content");
        };
        serde_json::from_str(&text.text).expect("envelope parses as JSON")
    }

    #[test]
    fn test_success_envelope_shape() {
        let result = success_response(
            "jira_get_issue",
            "Fetched INGN-1000",
            &serde_json::json!({ "key": "INGN-1000" }),
        )
        .expect("serializable payload");

        assert_eq!(result.is_error, Some(false));
        let envelope = envelope_of(&result);
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["operation"], "jira_get_issue");
        assert_eq!(envelope["message"], "Fetched INGN-1000");
        assert_eq!(envelope["data"]["key"], "INGN-1000");
    }

    #[test]
    fn test_error_envelope_carries_kind_and_resource() {
        let error = SwitchboardError::Validation("issue_key must not be empty".to_string());
        let result = error_response("jira_get_issue", Some("INGN-1000"), &error);

        assert_eq!(result.is_error, Some(true));
        let envelope = envelope_of(&result);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["kind"], "validation");
        assert_eq!(envelope["operation"], "jira_get_issue");
        assert_eq!(envelope["resource"], "INGN-1000");
        assert!(envelope["message"]
            .as_str()
            .unwrap()
            .contains("must not be empty"));
    }

    #[test]
    fn test_error_envelope_omits_resource_when_absent() {
        let error = SwitchboardError::Timeout { seconds: 30 };
        let result = error_response("testrail_healthcheck", None, &error);

        let envelope = envelope_of(&result);
        assert_eq!(envelope["kind"], "timeout");
        assert!(envelope.get("resource").is_none());
    }

    #[test]
    fn test_error_envelope_never_contains_credentials() {
        let error = SwitchboardError::Http {
            status: 401,
            body: "authentication failed".to_string(),
        };
        let result = error_response("jira_healthcheck", None, &error);

        let envelope = envelope_of(&result);
        let rendered = envelope.to_string();
        assert!(rendered.contains("401"));
        assert!(!rendered.contains("Bearer"));
        assert!(!rendered.contains("Authorization"));
    }
}
