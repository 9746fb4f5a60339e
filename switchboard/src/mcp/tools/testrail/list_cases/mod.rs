//! TestRail case listing tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpFormatter;
use crate::mcp::testrail_types::ListCasesRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing test cases of a project
#[derive(Default)]
pub struct ListCasesTool;

impl ListCasesTool {
    /// Creates a new instance of the ListCasesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListCasesTool {
    fn name(&self) -> &'static str {
        "testrail_list_cases"
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
                },
                "section_id": {
                    "type": ["integer", "null"],
                    "description": "Restrict to one section"
                },
                "search_term": {
                    "type": ["string", "null"],
                    "description": "Case-insensitive filter on title and description"
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
        let request: ListCasesRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Listing TestRail cases for project {}", request.project_id);

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .list_cases(
                request.project_id,
                request.suite_id,
                request.section_id,
                request.search_term.as_deref(),
            )
            .await
        {
            Ok((cases, total)) => success_response(
                self.name(),
                McpFormatter::format_list_summary("case", cases.len(), total as usize),
                &serde_json::json!({
                    "total": total,
                    "cases": cases,
                }),
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.project_id.to_string()),
                &error,
            )),
        }
    }
}
