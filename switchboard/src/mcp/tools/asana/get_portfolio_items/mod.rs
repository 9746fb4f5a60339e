//! Asana portfolio items tool for MCP operations

use crate::mcp::asana_types::GetPortfolioItemsRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the projects inside a portfolio
#[derive(Default)]
pub struct GetPortfolioItemsTool;

impl GetPortfolioItemsTool {
    /// Creates a new instance of the GetPortfolioItemsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPortfolioItemsTool {
    fn name(&self) -> &'static str {
        "asana_get_portfolio_items"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "portfolio_gid": {
                    "type": "string",
                    "description": "Portfolio gid"
                }
            },
            "required": ["portfolio_gid"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetPortfolioItemsRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) =
            McpValidation::validate_not_empty(&request.portfolio_gid, "portfolio gid")
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.portfolio_items(&request.portfolio_gid).await {
            Ok(items) => success_response(
                self.name(),
                format!("Found {} projects", items.len()),
                &serde_json::json!({ "projects": items }),
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.portfolio_gid),
                &error,
            )),
        }
    }
}
