//! TestRail health check tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::HealthcheckRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for checking TestRail connectivity and credentials
#[derive(Default)]
pub struct TestRailHealthcheckTool;

impl TestRailHealthcheckTool {
    /// Creates a new instance of the TestRailHealthcheckTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for TestRailHealthcheckTool {
    fn name(&self) -> &'static str {
        "testrail_healthcheck"
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

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.probe().await {
            Ok(user) => {
                tracing::info!("TestRail healthcheck passed for {}", client.base_url());
                success_response(
                    self.name(),
                    format!("TestRail is healthy: authenticated as {}", user.name),
                    &serde_json::json!({
                        "service": "testrail",
                        "base_url": client.base_url(),
                        "auth_scheme": client.auth_scheme().to_string(),
                        "user": user,
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
        let tool = TestRailHealthcheckTool::new();
        assert_eq!(tool.name(), "testrail_healthcheck");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_service_reports_configuration_error() {
        let tool = TestRailHealthcheckTool::new();
        let result = tool
            .execute(serde_json::Map::new(), &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
