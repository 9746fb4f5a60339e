//! Jira health check tool for MCP operations
//!
//! This module provides the JiraHealthcheckTool for verifying Jira connectivity
//! and credentials through the MCP protocol.

use crate::mcp::jira_types::HealthcheckRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for checking Jira connectivity and credentials
#[derive(Default)]
pub struct JiraHealthcheckTool;

impl JiraHealthcheckTool {
    /// Creates a new instance of the JiraHealthcheckTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for JiraHealthcheckTool {
    fn name(&self) -> &'static str {
        "jira_healthcheck"
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

        // Unconfigured service: report without touching the network
        let client = match context.require_jira() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.probe().await {
            Ok(user) => {
                tracing::info!("Jira healthcheck passed for {}", client.base_url());
                success_response(
                    self.name(),
                    format!("Jira is healthy: authenticated as {}", user.display_name),
                    &serde_json::json!({
                        "service": "jira",
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
