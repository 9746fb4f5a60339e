//! Confluence page fetch tool for MCP operations

use crate::mcp::confluence_types::GetPageRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for fetching one page by title within a space
#[derive(Default)]
pub struct GetPageTool;

impl GetPageTool {
    /// Creates a new instance of the GetPageTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPageTool {
    fn name(&self) -> &'static str {
        "confluence_get_page"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Exact page title"
                },
                "space_key": {
                    "type": "string",
                    "description": "Space the page lives in"
                }
            },
            "required": ["title", "space_key"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetPageRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!(
            "Fetching Confluence page '{}' in {}",
            request.title,
            request.space_key
        );

        if let Err(error) = McpValidation::validate_not_empty(&request.title, "title")
            .and_then(|_| McpValidation::validate_not_empty(&request.space_key, "space key"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_confluence() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.get_page(&request.title, &request.space_key).await {
            Ok(page) => success_response(
                self.name(),
                format!("Retrieved page {} (v{})", page.title, page.version),
                &page,
            ),
            Err(error) => Ok(error_response(self.name(), Some(&request.title), &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = GetPageTool::new();
        assert_eq!(tool.name(), "confluence_get_page");
        assert!(!tool.description().is_empty());
        assert_eq!(
            tool.schema()["required"],
            serde_json::json!(["title", "space_key"])
        );
    }

    #[tokio::test]
    async fn test_blank_title_is_validation_error() {
        let tool = GetPageTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("title".to_string(), serde_json::json!(""));
        arguments.insert("space_key".to_string(), serde_json::json!("ENG"));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
