//! Asana task fetch tool for MCP operations

use crate::mcp::asana_types::GetTaskRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for fetching one task with full detail
#[derive(Default)]
pub struct GetTaskTool;

impl GetTaskTool {
    /// Creates a new instance of the GetTaskTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetTaskTool {
    fn name(&self) -> &'static str {
        "asana_get_task"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "task_gid": {
                    "type": "string",
                    "description": "Task gid"
                }
            },
            "required": ["task_gid"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetTaskRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Fetching Asana task {}", request.task_gid);

        if let Err(error) = McpValidation::validate_not_empty(&request.task_gid, "task gid") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.get_task(&request.task_gid).await {
            Ok(task) => {
                success_response(self.name(), format!("Retrieved task {}", task.name), &task)
            }
            Err(error) => Ok(error_response(self.name(), Some(&request.task_gid), &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = GetTaskTool::new();
        assert_eq!(tool.name(), "asana_get_task");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_blank_task_gid_is_validation_error() {
        let tool = GetTaskTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("task_gid".to_string(), serde_json::json!(""));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
