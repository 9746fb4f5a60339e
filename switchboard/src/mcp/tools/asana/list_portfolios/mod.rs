//! Asana portfolio listing tool for MCP operations

use crate::mcp::asana_types::ListPortfoliosRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing portfolios owned by a user
#[derive(Default)]
pub struct ListPortfoliosTool;

impl ListPortfoliosTool {
    /// Creates a new instance of the ListPortfoliosTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListPortfoliosTool {
    fn name(&self) -> &'static str {
        "asana_list_portfolios"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "workspace_gid": {
                    "type": ["string", "null"],
                    "description": "Workspace gid; falls back to the configured default workspace"
                },
                "owner": {
                    "type": ["string", "null"],
                    "description": "Portfolio owner gid or email; defaults to the authenticated user"
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListPortfoliosRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .list_portfolios(request.workspace_gid.as_deref(), request.owner.as_deref())
            .await
        {
            Ok(portfolios) => success_response(
                self.name(),
                format!("Found {} portfolios", portfolios.len()),
                &serde_json::json!({ "portfolios": portfolios }),
            ),
            Err(error) => Ok(error_response(
                self.name(),
                request.workspace_gid.as_deref(),
                &error,
            )),
        }
    }
}
