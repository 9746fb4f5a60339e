//! Bitbucket reviewer dashboard tool for MCP operations

use crate::mcp::bitbucket_types::ListReviewedPrsRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::{McpFormatter, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing pull requests a user is reviewing
#[derive(Default)]
pub struct ListReviewedPrsTool;

impl ListReviewedPrsTool {
    /// Creates a new instance of the ListReviewedPrsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListReviewedPrsTool {
    fn name(&self) -> &'static str {
        "bitbucket_list_reviewed_prs"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "Reviewer user name"
                },
                "state": {
                    "type": "string",
                    "description": "Pull request state: OPEN, MERGED, DECLINED or ALL (default OPEN)"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of pull requests to return (default 25)"
                }
            },
            "required": ["username"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListReviewedPrsRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.username, "username")
            .and_then(|_| McpValidation::validate_limit(request.limit, "limit"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_bitbucket() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .reviewed_pull_requests(&request.username, &request.state, request.limit)
            .await
        {
            Ok((pull_requests, total)) => {
                let summary = McpFormatter::format_list_summary(
                    "pull request",
                    pull_requests.len(),
                    total as usize,
                );
                success_response(
                    self.name(),
                    summary,
                    &serde_json::json!({
                        "total": total,
                        "pull_requests": pull_requests,
                    }),
                )
            }
            Err(error) => Ok(error_response(self.name(), Some(&request.username), &error)),
        }
    }
}
