//! Confluence health check tool for MCP operations

use crate::mcp::confluence_types::HealthcheckRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for checking Confluence connectivity and credentials
#[derive(Default)]
pub struct ConfluenceHealthcheckTool;

impl ConfluenceHealthcheckTool {
    /// Creates a new instance of the ConfluenceHealthcheckTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ConfluenceHealthcheckTool {
    fn name(&self) -> &'static str {
        "confluence_healthcheck"
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
        let _request: HealthcheckRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_confluence() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.probe().await {
            Ok(space_count) => {
                tracing::info!("Confluence healthcheck passed for {}", client.base_url());
                success_response(
                    self.name(),
                    format!("Confluence is healthy: {space_count} spaces visible"),
                    &serde_json::json!({
                        "service": "confluence",
                        "base_url": client.base_url(),
                        "auth_scheme": client.auth_scheme().to_string(),
                        "space_count": space_count,
                    }),
                )
            }
            Err(error) => Ok(error_response(self.name(), Some(client.base_url()), &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = ConfluenceHealthcheckTool::new();
        assert_eq!(tool.name(), "confluence_healthcheck");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_service_reports_configuration_error() {
        let tool = ConfluenceHealthcheckTool::new();
        let result = tool
            .execute(serde_json::Map::new(), &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
