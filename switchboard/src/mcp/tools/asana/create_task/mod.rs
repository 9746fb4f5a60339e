//! Asana task creation tool for MCP operations

use crate::mcp::asana_types::CreateTaskRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for creating a task in a project
#[derive(Default)]
pub struct CreateTaskTool;

impl CreateTaskTool {
    /// Creates a new instance of the CreateTaskTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateTaskTool {
    fn name(&self) -> &'static str {
        "asana_create_task"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Task name"
                },
                "project_gid": {
                    "type": "string",
                    "description": "Project gid to add the task to"
                },
                "notes": {
                    "type": ["string", "null"],
                    "description": "Task notes (plain text)"
                },
                "assignee": {
                    "type": ["string", "null"],
                    "description": "Assignee gid or email"
                },
                "due_on": {
                    "type": ["string", "null"],
                    "description": "Due date, YYYY-MM-DD"
                }
            },
            "required": ["name", "project_gid"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateTaskRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Creating Asana task '{}'", request.name);

        if let Err(error) = McpValidation::validate_not_empty(&request.name, "name")
            .and_then(|_| McpValidation::validate_not_empty(&request.project_gid, "project gid"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        let new_task = crate::asana::NewTask {
            name: request.name.clone(),
            project_gid: request.project_gid.clone(),
            notes: request.notes.clone(),
            assignee: request.assignee.clone(),
            due_on: request.due_on.clone(),
        };

        match client.create_task(&new_task).await {
            Ok(created) => success_response(
                self.name(),
                format!("Created task {}", created.gid),
                &created,
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.project_gid),
                &error,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = CreateTaskTool::new();
        assert_eq!(tool.name(), "asana_create_task");
        assert!(!tool.description().is_empty());
        assert_eq!(
            tool.schema()["required"],
            serde_json::json!(["name", "project_gid"])
        );
    }

    #[tokio::test]
    async fn test_blank_name_is_validation_error() {
        let tool = CreateTaskTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("name".to_string(), serde_json::json!("  "));
        arguments.insert(
            "project_gid".to_string(),
            serde_json::json!("1200000000000042"),
        );

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
