//! TestRail project listing tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpFormatter;
use crate::mcp::testrail_types::ListProjectsRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing projects
#[derive(Default)]
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Creates a new instance of the ListProjectsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectsTool {
    fn name(&self) -> &'static str {
        "testrail_list_projects"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "search_term": {
                    "type": ["string", "null"],
                    "description": "Case-insensitive filter on project names"
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListProjectsRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.list_projects(request.search_term.as_deref()).await {
            Ok((projects, total)) => success_response(
                self.name(),
                McpFormatter::format_list_summary("project", projects.len(), total as usize),
                &serde_json::json!({
                    "total": total,
                    "projects": projects,
                }),
            ),
            Err(error) => Ok(error_response(self.name(), None, &error)),
        }
    }
}
