//! TestRail section listing tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::ListSectionsRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the sections of a project
#[derive(Default)]
pub struct ListSectionsTool;

impl ListSectionsTool {
    /// Creates a new instance of the ListSectionsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListSectionsTool {
    fn name(&self) -> &'static str {
        "testrail_list_sections"
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
                "suite_id": {
                    "type": ["integer", "null"],
                    "description": "Restrict to one suite"
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
        let request: ListSectionsRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .list_sections(request.project_id, request.suite_id)
            .await
        {
            Ok(sections) => success_response(
                self.name(),
                format!("Found {} sections", sections.len()),
                &serde_json::json!({ "sections": sections }),
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
        let tool = ListSectionsTool::new();
        assert_eq!(tool.name(), "testrail_list_sections");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_service_reports_configuration_error() {
        let tool = ListSectionsTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("project_id".to_string(), serde_json::json!(7));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
