//! Asana project listing tool for MCP operations

use crate::mcp::asana_types::ListProjectsRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing projects in a workspace
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
        "asana_list_projects"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "workspace_gid": {
                    "type": ["string", "null"],
                    "description": "Workspace gid; falls back to the configured default workspace"
                },
                "archived": {
                    "type": "boolean",
                    "description": "Include archived projects (default false)"
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

        let client = match context.require_asana() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .list_projects(request.workspace_gid.as_deref(), request.archived)
            .await
        {
            Ok(projects) => success_response(
                self.name(),
                format!("Found {} projects", projects.len()),
                &serde_json::json!({ "projects": projects }),
            ),
            Err(error) => Ok(error_response(
                self.name(),
                request.workspace_gid.as_deref(),
                &error,
            )),
        }
    }
}
