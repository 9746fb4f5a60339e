//! Jira issue retrieval tool for MCP operations
//!
//! This module provides the GetIssueTool for fetching one issue with all
//! fields through the MCP protocol.

use crate::mcp::jira_types::GetIssueRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for fetching a single Jira issue
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "jira_get_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue key, e.g. INGN-1000"
                }
            },
            "required": ["issue_key"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetIssueRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Fetching Jira issue {}", request.issue_key);

        if let Err(error) = McpValidation::validate_not_empty(&request.issue_key, "issue key") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_jira() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.get_issue(&request.issue_key).await {
            Ok(issue) => success_response(
                self.name(),
                format!("Fetched issue {}: {}", issue.key, issue.summary),
                &issue,
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.issue_key),
                &error,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = GetIssueTool::new();
        assert_eq!(tool.name(), "jira_get_issue");
        assert!(!tool.description().is_empty());
        assert_eq!(tool.schema()["required"][0], "issue_key");
    }

    #[tokio::test]
    async fn test_empty_issue_key_is_validation_error() {
        let tool = GetIssueTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("issue_key".to_string(), serde_json::json!("   "));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_missing_issue_key_is_protocol_error() {
        let tool = GetIssueTool::new();
        let result = tool
            .execute(serde_json::Map::new(), &ToolContext::default())
            .await;
        assert!(result.is_err());
    }
}
