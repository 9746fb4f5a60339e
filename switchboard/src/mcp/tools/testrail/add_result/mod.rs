//! TestRail result recording tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::AddResultRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for recording a result against a test
#[derive(Default)]
pub struct AddResultTool;

impl AddResultTool {
    /// Creates a new instance of the AddResultTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddResultTool {
    fn name(&self) -> &'static str {
        "testrail_add_result"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "test_id": {
                    "type": "integer",
                    "description": "Test id (a case instance within a run)"
                },
                "status_id": {
                    "type": "integer",
                    "description": "Result status: 1 passed, 2 blocked, 3 untested, 4 retest, 5 failed"
                },
                "comment": {
                    "type": ["string", "null"],
                    "description": "Result comment"
                },
                "version": {
                    "type": ["string", "null"],
                    "description": "Version the test ran against"
                },
                "elapsed": {
                    "type": ["string", "null"],
                    "description": "Elapsed time, e.g. \"30s\" or \"2m 30s\""
                },
                "defects": {
                    "type": ["string", "null"],
                    "description": "Linked defect references"
                },
                "assignedto_id": {
                    "type": ["integer", "null"],
                    "description": "User id to assign the test to"
                }
            },
            "required": ["test_id", "status_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddResultRequest = BaseToolImpl::parse_arguments(arguments)?;

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        // Status range checks live in the client.
        let new_result = crate::testrail::NewResult {
            status_id: request.status_id,
            comment: request.comment.clone(),
            version: request.version.clone(),
            elapsed: request.elapsed.clone(),
            defects: request.defects.clone(),
            assignedto_id: request.assignedto_id,
        };

        match client.add_result(request.test_id, &new_result).await {
            Ok(result) => success_response(
                self.name(),
                format!("Recorded result {} for test T{}", result.id, result.test_id),
                &result,
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.test_id.to_string()),
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
        let tool = AddResultTool::new();
        assert_eq!(tool.name(), "testrail_add_result");
        assert!(!tool.description().is_empty());
        assert_eq!(
            tool.schema()["required"],
            serde_json::json!(["test_id", "status_id"])
        );
    }

    #[tokio::test]
    async fn test_unconfigured_service_reports_configuration_error() {
        let tool = AddResultTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("test_id".to_string(), serde_json::json!(4001));
        arguments.insert("status_id".to_string(), serde_json::json!(1));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
