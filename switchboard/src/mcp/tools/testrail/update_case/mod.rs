//! TestRail case update tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::UpdateCaseRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for updating fields of an existing test case
#[derive(Default)]
pub struct UpdateCaseTool;

impl UpdateCaseTool {
    /// Creates a new instance of the UpdateCaseTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateCaseTool {
    fn name(&self) -> &'static str {
        "testrail_update_case"
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
                    "description": "Case id to update"
                },
                "title": {
                    "type": ["string", "null"],
                    "description": "New title"
                },
                "template_id": {
                    "type": ["integer", "null"],
                    "description": "New template id"
                },
                "type_id": {
                    "type": ["integer", "null"],
                    "description": "New case type id"
                },
                "priority_id": {
                    "type": ["integer", "null"],
                    "description": "New priority id"
                },
                "refs": {
                    "type": ["string", "null"],
                    "description": "New references"
                },
                "description": {
                    "type": ["string", "null"],
                    "description": "New description"
                },
                "steps": {
                    "type": ["string", "null"],
                    "description": "New steps text block"
                },
                "expected": {
                    "type": ["string", "null"],
                    "description": "New expected result text block"
                },
                "steps_separated": {
                    "type": ["array", "null"],
                    "items": {
                        "type": "object",
                        "properties": {
                            "content": { "type": "string" },
                            "expected": { "type": "string" }
                        },
                        "required": ["content", "expected"]
                    },
                    "description": "Replacement structured steps"
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
        let request: UpdateCaseRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Updating TestRail case C{}", request.case_id);

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        // An update with no fields set is rejected by the client.
        let update = crate::testrail::CaseUpdate {
            title: request.title.clone(),
            template_id: request.template_id,
            type_id: request.type_id,
            priority_id: request.priority_id,
            refs: request.refs.clone(),
            description: request.description.clone(),
            steps: request.steps.clone(),
            expected: request.expected.clone(),
            steps_separated: request.steps_separated.clone(),
        };

        match client.update_case(request.case_id, &update).await {
            Ok(case) => {
                success_response(self.name(), format!("Updated case C{}", case.id), &case)
            }
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.case_id.to_string()),
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
        let tool = UpdateCaseTool::new();
        assert_eq!(tool.name(), "testrail_update_case");
        assert!(!tool.description().is_empty());
        assert_eq!(tool.schema()["required"], serde_json::json!(["case_id"]));
    }

    #[tokio::test]
    async fn test_unconfigured_service_reports_configuration_error() {
        let tool = UpdateCaseTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("case_id".to_string(), serde_json::json!(101));
        arguments.insert("title".to_string(), serde_json::json!("Renamed"));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
