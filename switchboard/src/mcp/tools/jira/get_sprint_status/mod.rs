//! Jira sprint status tool for MCP operations

use crate::mcp::jira_types::GetSprintStatusRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for reporting the active sprint of a board
#[derive(Default)]
pub struct GetSprintStatusTool;

impl GetSprintStatusTool {
    /// Creates a new instance of the GetSprintStatusTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetSprintStatusTool {
    fn name(&self) -> &'static str {
        "jira_get_sprint_status"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "board_id": {
                    "type": "string",
                    "description": "Agile board id"
                }
            },
            "required": ["board_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetSprintStatusRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.board_id, "board id") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_jira() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.sprint_status(&request.board_id).await {
            Ok(status) => {
                let message = match &status.sprint {
                    Some(sprint) => format!(
                        "Active sprint '{}' with {} issue(s)",
                        sprint.name,
                        sprint.issues.len()
                    ),
                    None => format!("Board {} has no active sprint", request.board_id),
                };
                success_response(self.name(), message, &status)
            }
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.board_id),
                &error,
            )),
        }
    }
}
