//! TestRail run listing tool for MCP operations

use crate::error::SwitchboardError;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::ListRunsRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

const RUN_STATUSES: [&str; 3] = ["active", "completed", "all"];

/// Tool for listing the test runs of a project
#[derive(Default)]
pub struct ListRunsTool;

impl ListRunsTool {
    /// Creates a new instance of the ListRunsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListRunsTool {
    fn name(&self) -> &'static str {
        "testrail_list_runs"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_id": {
                    "type": "integer",
                    "description": "Project id"
                },
                "status": {
                    "type": "string",
                    "enum": RUN_STATUSES,
                    "description": "Run state filter (default \"active\")"
                },
                "created_by": {
                    "type": ["integer", "null"],
                    "description": "Restrict to runs created by this user id"
                }
            },
            "required": ["project_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListRunsRequest = BaseToolImpl::parse_arguments(arguments)?;

        if !RUN_STATUSES.contains(&request.status.to_lowercase().as_str()) {
            let error = SwitchboardError::Validation(format!(
                "Status must be one of active, completed or all, got '{}'",
                request.status
            ));
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .list_runs(request.project_id, &request.status, request.created_by)
            .await
        {
            Ok(runs) => success_response(
                self.name(),
                format!("Found {} {} runs", runs.len(), request.status.to_lowercase()),
                &serde_json::json!({ "runs": runs }),
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.project_id.to_string()),
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
        let tool = ListRunsTool::new();
        assert_eq!(tool.name(), "testrail_list_runs");
        assert!(!tool.description().is_empty());
        assert_eq!(
            tool.schema()["properties"]["status"]["enum"],
            serde_json::json!(["active", "completed", "all"])
        );
    }

    #[tokio::test]
    async fn test_unknown_status_is_validation_error() {
        let tool = ListRunsTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("project_id".to_string(), serde_json::json!(7));
        arguments.insert("status".to_string(), serde_json::json!("paused"));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
