//! Jira issue update tool for MCP operations

use crate::jira::IssueUpdate;
use crate::mcp::jira_types::UpdateIssueRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for updating fields of an existing Jira issue
#[derive(Default)]
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    /// Creates a new instance of the UpdateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "jira_update_issue"
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
                    "description": "Issue key to update"
                },
                "summary": {
                    "type": ["string", "null"],
                    "description": "New summary"
                },
                "description": {
                    "type": ["string", "null"],
                    "description": "New description"
                },
                "assignee": {
                    "type": ["string", "null"],
                    "description": "New assignee user name; empty string unassigns"
                },
                "labels": {
                    "type": ["array", "null"],
                    "items": { "type": "string" },
                    "description": "Replacement label list"
                },
                "comment": {
                    "type": ["string", "null"],
                    "description": "Comment to add"
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
        let request: UpdateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Updating Jira issue {}", request.issue_key);

        if let Err(error) = McpValidation::validate_not_empty(&request.issue_key, "issue key") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_jira() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        let update = IssueUpdate {
            summary: request.summary,
            description: request.description,
            assignee: request.assignee,
            labels: request.labels,
            comment: request.comment,
        };

        // The empty-update case is rejected by the client as a validation
        // error before any request goes out
        match client.update_issue(&request.issue_key, &update).await {
            Ok(receipt) => success_response(
                self.name(),
                format!("Updated issue {}", receipt.key),
                &receipt,
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
        let tool = UpdateIssueTool::new();
        assert_eq!(tool.name(), "jira_update_issue");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_blank_issue_key_is_validation_error() {
        let tool = UpdateIssueTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("issue_key".to_string(), serde_json::json!(""));
        arguments.insert("summary".to_string(), serde_json::json!("New"));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
