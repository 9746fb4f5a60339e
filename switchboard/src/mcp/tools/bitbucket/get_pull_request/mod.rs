//! Bitbucket pull request retrieval tool for MCP operations

use crate::mcp::bitbucket_types::GetPullRequestRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for fetching a pull request by its web URL
#[derive(Default)]
pub struct GetPullRequestTool;

impl GetPullRequestTool {
    /// Creates a new instance of the GetPullRequestTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPullRequestTool {
    fn name(&self) -> &'static str {
        "bitbucket_get_pull_request"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pr_link": {
                    "type": "string",
                    "description": "Browser URL of the pull request"
                },
                "include_diff": {
                    "type": "boolean",
                    "description": "Also fetch the raw diff (default false)"
                }
            },
            "required": ["pr_link"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetPullRequestRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Fetching pull request {}", request.pr_link);

        if let Err(error) = McpValidation::validate_not_empty(&request.pr_link, "pull request link") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_bitbucket() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .get_pull_request(&request.pr_link, request.include_diff)
            .await
        {
            Ok(pull_request) => success_response(
                self.name(),
                format!(
                    "Pull request #{} ({}): {}",
                    pull_request.id, pull_request.state, pull_request.title
                ),
                &pull_request,
            ),
            Err(error) => Ok(error_response(self.name(), Some(&request.pr_link), &error)),
        }
    }
}
