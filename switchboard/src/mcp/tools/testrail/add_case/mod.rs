//! TestRail case creation tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::testrail_types::AddCaseRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for creating a test case in a section
#[derive(Default)]
pub struct AddCaseTool;

impl AddCaseTool {
    /// Creates a new instance of the AddCaseTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddCaseTool {
    fn name(&self) -> &'static str {
        "testrail_add_case"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "section_id": {
                    "type": "integer",
                    "description": "Section to create the case in"
                },
                "title": {
                    "type": "string",
                    "description": "Case title"
                },
                "template_id": {
                    "type": ["integer", "null"],
                    "description": "Template id"
                },
                "type_id": {
                    "type": ["integer", "null"],
                    "description": "Case type id"
                },
                "priority_id": {
                    "type": ["integer", "null"],
                    "description": "Priority id"
                },
                "refs": {
                    "type": ["string", "null"],
                    "description": "References, e.g. linked issue keys"
                },
                "description": {
                    "type": ["string", "null"],
                    "description": "Case description"
                },
                "steps": {
                    "type": ["string", "null"],
                    "description": "Steps as one text block"
                },
                "expected": {
                    "type": ["string", "null"],
                    "description": "Expected result as one text block"
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
                    "description": "Steps as structured step/expected pairs"
                }
            },
            "required": ["section_id", "title"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddCaseRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Creating TestRail case '{}'", request.title);

        if let Err(error) = McpValidation::validate_not_empty(&request.title, "title") {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        let new_case = crate::testrail::NewCase {
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

        match client.add_case(request.section_id, &new_case).await {
            Ok(case) => {
                success_response(self.name(), format!("Created case C{}", case.id), &case)
            }
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.section_id.to_string()),
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
        let tool = AddCaseTool::new();
        assert_eq!(tool.name(), "testrail_add_case");
        assert!(!tool.description().is_empty());
        assert_eq!(
            tool.schema()["required"],
            serde_json::json!(["section_id", "title"])
        );
    }

    #[tokio::test]
    async fn test_blank_title_is_validation_error() {
        let tool = AddCaseTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("section_id".to_string(), serde_json::json!(12));
        arguments.insert("title".to_string(), serde_json::json!("  "));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
