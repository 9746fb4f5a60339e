//! Asana workspace listing tool for MCP operations

use crate::mcp::asana_types::ListWorkspacesRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing workspaces visible to the token
#[derive(Default)]
pub struct ListWorkspacesTool;

impl ListWorkspacesTool {
    /// Creates a new instance of the ListWorkspacesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListWorkspacesTool {
    fn name(&self) -> &'static str {
        "asana_list_workspaces"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let _request: ListWorkspacesRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.list_workspaces().await {
            Ok(workspaces) => success_response(
                self.name(),
                format!("Found {} workspaces", workspaces.len()),
                &serde_json::json!({ "workspaces": workspaces }),
            ),
            Err(error) => Ok(error_response(self.name(), None, &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = ListWorkspacesTool::new();
        assert_eq!(tool.name(), "asana_list_workspaces");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_service_reports_configuration_error() {
        let tool = ListWorkspacesTool::new();
        let result = tool
            .execute(serde_json::Map::new(), &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
