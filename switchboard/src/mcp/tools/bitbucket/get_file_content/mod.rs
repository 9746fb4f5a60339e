//! Bitbucket file content tool for MCP operations

use crate::mcp::bitbucket_types::GetFileContentRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for reading one file from a repository
#[derive(Default)]
pub struct GetFileContentTool;

impl GetFileContentTool {
    /// Creates a new instance of the GetFileContentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetFileContentTool {
    fn name(&self) -> &'static str {
        "bitbucket_get_file_content"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project": {
                    "type": "string",
                    "description": "Project key"
                },
                "repository": {
                    "type": "string",
                    "description": "Repository slug"
                },
                "file_path": {
                    "type": "string",
                    "description": "Path of the file within the repository"
                },
                "at_ref": {
                    "type": ["string", "null"],
                    "description": "Branch, tag or commit; defaults to the default branch"
                }
            },
            "required": ["project", "repository", "file_path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetFileContentRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.project, "project")
            .and_then(|_| McpValidation::validate_not_empty(&request.repository, "repository"))
            .and_then(|_| McpValidation::validate_not_empty(&request.file_path, "file path"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_bitbucket() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .file_content(
                &request.project,
                &request.repository,
                &request.file_path,
                request.at_ref.as_deref(),
            )
            .await
        {
            Ok(content) => success_response(
                self.name(),
                format!(
                    "Read {} ({} lines)",
                    request.file_path,
                    content.lines().count()
                ),
                &serde_json::json!({
                    "file_path": request.file_path,
                    "content": content,
                }),
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.file_path),
                &error,
            )),
        }
    }
}
