//! TestRail case fetch tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::GetCaseRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for fetching one test case with step detail
#[derive(Default)]
pub struct GetCaseTool;

impl GetCaseTool {
    /// Creates a new instance of the GetCaseTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetCaseTool {
    fn name(&self) -> &'static str {
        "testrail_get_case"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "case_id": {
                    "type": "integer",
                    "description": "Case id"
                }
            },
            "required": ["case_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetCaseRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.get_case(request.case_id).await {
            Ok(case) => success_response(
                self.name(),
                format!("Retrieved case C{}", case.id),
                &case,
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.case_id.to_string()),
                &error,
            )),
        }
    }
}
