//! Confluence page search tool for MCP operations

use crate::mcp::confluence_types::SearchPagesRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::{McpFormatter, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for full-text page search
#[derive(Default)]
pub struct SearchPagesTool;

impl SearchPagesTool {
    /// Creates a new instance of the SearchPagesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchPagesTool {
    fn name(&self) -> &'static str {
        "confluence_search_pages"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search text, matched against page content"
                },
                "space_key": {
                    "type": ["string", "null"],
                    "description": "Restrict the search to one space"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of pages to return (default 25)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchPagesRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Searching Confluence pages: {}", request.query);

        if let Err(error) = McpValidation::validate_not_empty(&request.query, "query")
            .and_then(|_| McpValidation::validate_limit(request.limit, "limit"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_confluence() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .search_pages(&request.query, request.space_key.as_deref(), request.limit)
            .await
        {
            Ok((pages, total)) => success_response(
                self.name(),
                McpFormatter::format_list_summary("page", pages.len(), total as usize),
                &serde_json::json!({
                    "total": total,
                    "pages": pages,
                }),
            ),
            Err(error) => Ok(error_response(self.name(), Some(&request.query), &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = SearchPagesTool::new();
        assert_eq!(tool.name(), "confluence_search_pages");
        assert!(!tool.description().is_empty());
        assert_eq!(tool.schema()["required"], serde_json::json!(["query"]));
    }

    #[tokio::test]
    async fn test_zero_limit_is_validation_error() {
        let tool = SearchPagesTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("query".to_string(), serde_json::json!("deployment"));
        arguments.insert("limit".to_string(), serde_json::json!(0));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
