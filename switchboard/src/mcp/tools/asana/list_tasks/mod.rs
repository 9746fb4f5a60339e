//! Asana task listing tool for MCP operations

use crate::mcp::asana_types::ListTasksRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the tasks of a project
#[derive(Default)]
pub struct ListTasksTool;

impl ListTasksTool {
    /// Creates a new instance of the ListTasksTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListTasksTool {
    fn name(&self) -> &'static str {
        "asana_list_tasks"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_gid": {
                    "type": "string",
                    "description": "Project gid"
                },
                "completed_since": {
                    "type": ["string", "null"],
                    "description": "Only tasks incomplete or completed since this ISO-8601 time"
                }
            },
            "required": ["project_gid"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListTasksRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.project_gid, "project gid") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .list_tasks(&request.project_gid, request.completed_since.as_deref())
            .await
        {
            Ok(tasks) => success_response(
                self.name(),
                format!("Found {} tasks", tasks.len()),
                &serde_json::json!({ "tasks": tasks }),
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
        let tool = ListTasksTool::new();
        assert_eq!(tool.name(), "asana_list_tasks");
        assert!(!tool.description().is_empty());
        assert_eq!(
            tool.schema()["required"],
            serde_json::json!(["project_gid"])
        );
    }

    #[tokio::test]
    async fn test_blank_project_gid_is_validation_error() {
        let tool = ListTasksTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("project_gid".to_string(), serde_json::json!(" "));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
