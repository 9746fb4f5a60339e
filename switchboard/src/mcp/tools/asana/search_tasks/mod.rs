//! Asana task search tool for MCP operations

use crate::mcp::asana_types::SearchTasksRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::{McpFormatter, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for text search across tasks in a workspace
#[derive(Default)]
pub struct SearchTasksTool;

impl SearchTasksTool {
    /// Creates a new instance of the SearchTasksTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchTasksTool {
    fn name(&self) -> &'static str {
        "asana_search_tasks"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search text"
                },
                "workspace_gid": {
                    "type": ["string", "null"],
                    "description": "Workspace gid; falls back to the configured default workspace"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of tasks to return (default 25)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchTasksRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Searching Asana tasks: {}", request.query);

        if let Err(error) = McpValidation::validate_not_empty(&request.query, "query")
            .and_then(|_| McpValidation::validate_limit(request.limit, "limit"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .search_tasks(
                &request.query,
                request.workspace_gid.as_deref(),
                request.limit,
            )
            .await
        {
            Ok(tasks) => {
                let count = tasks.len();
                success_response(
                    self.name(),
                    McpFormatter::format_list_summary("task", count, count),
                    &serde_json::json!({ "tasks": tasks }),
                )
            }
            Err(error) => Ok(error_response(self.name(), Some(&request.query), &error)),
        }
    }
}
