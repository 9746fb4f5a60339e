//! Jira development summary tool for MCP operations
//!
//! Reads the dev-summary custom field of an issue and reports the linked
//! pull request counts and state.

use crate::mcp::jira_types::GetIssuePullRequestsRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for reading the pull requests linked to a Jira issue
#[derive(Default)]
pub struct GetIssuePullRequestsTool;

impl GetIssuePullRequestsTool {
    /// Creates a new instance of the GetIssuePullRequestsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssuePullRequestsTool {
    fn name(&self) -> &'static str {
        "jira_get_issue_pull_requests"
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
        let request: GetIssuePullRequestsRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.issue_key, "issue key") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_jira() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.issue_pull_requests(&request.issue_key).await {
            Ok(summary) => {
                let message = if summary.pr_count == 0 {
                    format!("No pull requests linked to {}", request.issue_key)
                } else {
                    format!(
                        "{} pull request(s) linked to {} ({} open, {} merged)",
                        summary.pr_count, request.issue_key, summary.open_count,
                        summary.merged_count
                    )
                };
                success_response(self.name(), message, &summary)
            }
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.issue_key),
                &error,
            )),
        }
    }
}
