//! TestRail run close tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::CloseRunRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for closing a run and locking its results
#[derive(Default)]
pub struct CloseRunTool;

impl CloseRunTool {
    /// Creates a new instance of the CloseRunTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CloseRunTool {
    fn name(&self) -> &'static str {
        "testrail_close_run"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "run_id": {
                    "type": "integer",
                    "description": "Run id to close"
                }
            },
            "required": ["run_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CloseRunRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.close_run(request.run_id).await {
            Ok(run) => {
                tracing::info!("Closed TestRail run R{}", run.id);
                success_response(
                    self.name(),
                    format!("Closed run R{} ({})", run.id, run.name),
                    &run,
                )
            }
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.run_id.to_string()),
                &error,
            )),
        }
    }
}
