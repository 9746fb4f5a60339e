//! Confluence page creation tool for MCP operations

use crate::mcp::confluence_types::CreatePageRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for creating a page from Markdown
#[derive(Default)]
pub struct CreatePageTool;

impl CreatePageTool {
    /// Creates a new instance of the CreatePageTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreatePageTool {
    fn name(&self) -> &'static str {
        "confluence_create_page"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "space_key": {
                    "type": "string",
                    "description": "Space to create the page in"
                },
                "title": {
                    "type": "string",
                    "description": "Page title"
                },
                "body_markdown": {
                    "type": "string",
                    "description": "Page body as Markdown; converted to storage format before upload"
                },
                "parent_page_id": {
                    "type": ["string", "null"],
                    "description": "Optional parent page id; the page is created as its child"
                },
                "labels": {
                    "type": ["array", "null"],
                    "items": { "type": "string" },
                    "description": "Labels to attach after creation"
                }
            },
            "required": ["space_key", "title", "body_markdown"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreatePageRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!(
            "Creating Confluence page '{}' in {}",
            request.title,
            request.space_key
        );

        if let Err(error) = McpValidation::validate_not_empty(&request.space_key, "space key")
            .and_then(|_| McpValidation::validate_not_empty(&request.title, "title"))
            .and_then(|_| McpValidation::validate_not_empty(&request.body_markdown, "body"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_confluence() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        let new_page = crate::confluence::NewPage {
            space_key: request.space_key.clone(),
            title: request.title.clone(),
            body_markdown: request.body_markdown.clone(),
            parent_page_id: request.parent_page_id.clone(),
            labels: request.labels.clone(),
        };

        match client.create_page(&new_page).await {
            Ok(created) => success_response(
                self.name(),
                format!("Created page {}", created.title),
                &created,
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
        let tool = CreatePageTool::new();
        assert_eq!(tool.name(), "confluence_create_page");
        assert!(!tool.description().is_empty());
        assert_eq!(
            tool.schema()["required"],
            serde_json::json!(["space_key", "title", "body_markdown"])
        );
    }

    #[tokio::test]
    async fn test_blank_body_is_validation_error() {
        let tool = CreatePageTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("space_key".to_string(), serde_json::json!("ENG"));
        arguments.insert("title".to_string(), serde_json::json!("New Page"));
        arguments.insert("body_markdown".to_string(), serde_json::json!("   "));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
