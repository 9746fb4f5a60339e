//! Asana task update tool for MCP operations

use crate::mcp::asana_types::UpdateTaskRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for updating fields of an existing task
#[derive(Default)]
pub struct UpdateTaskTool;

impl UpdateTaskTool {
    /// Creates a new instance of the UpdateTaskTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateTaskTool {
    fn name(&self) -> &'static str {
        "asana_update_task"
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
                    "description": "Task gid to update"
                },
                "name": {
                    "type": ["string", "null"],
                    "description": "New name"
                },
                "notes": {
                    "type": ["string", "null"],
                    "description": "New notes"
                },
                "completed": {
                    "type": ["boolean", "null"],
                    "description": "Mark the task complete or incomplete"
                },
                "assignee": {
                    "type": ["string", "null"],
                    "description": "New assignee gid or email"
                },
                "due_on": {
                    "type": ["string", "null"],
                    "description": "New due date, YYYY-MM-DD"
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
        let request: UpdateTaskRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Updating Asana task {}", request.task_gid);

        if let Err(error) = McpValidation::validate_not_empty(&request.task_gid, "task gid") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        // An update with no fields set is rejected by the client.
        let update = crate::asana::TaskUpdate {
            name: request.name.clone(),
            notes: request.notes.clone(),
            completed: request.completed,
            assignee: request.assignee.clone(),
            due_on: request.due_on.clone(),
        };

        match client.update_task(&request.task_gid, &update).await {
            Ok(task) => {
                success_response(self.name(), format!("Updated task {}", task.gid), &task)
            }
            Err(error) => Ok(error_response(self.name(), Some(&request.task_gid), &error)),
        }
    }
}
