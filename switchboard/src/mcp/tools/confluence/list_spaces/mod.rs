//! Confluence space listing tool for MCP operations

use crate::mcp::confluence_types::ListSpacesRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing visible spaces
#[derive(Default)]
pub struct ListSpacesTool;

impl ListSpacesTool {
    /// Creates a new instance of the ListSpacesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListSpacesTool {
    fn name(&self) -> &'static str {
        "confluence_list_spaces"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of spaces to return (default 50)"
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
        let request: ListSpacesRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_limit(request.limit, "limit") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_confluence() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.list_spaces(request.limit).await {
            Ok(spaces) => success_response(
                self.name(),
                format!("Found {} spaces", spaces.len()),
                &serde_json::json!({ "spaces": spaces }),
            ),
            Err(error) => Ok(error_response(self.name(), None, &error)),
        }
    }
}
