//! Jira issue search tool for MCP operations

use crate::mcp::jira_types::SearchIssuesRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::{McpFormatter, McpValidation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for running a JQL search
#[derive(Default)]
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    /// Creates a new instance of the SearchIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "jira_search_issues"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "jql": {
                    "type": "string",
                    "description": "JQL query, e.g. project = OPS AND status = 'In Progress'"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of issues to return (default 50)"
                }
            },
            "required": ["jql"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Searching Jira issues: {}", request.jql);

        if let Err(error) = McpValidation::validate_not_empty(&request.jql, "JQL")
            .and_then(|_| McpValidation::validate_limit(request.max_results, "max results"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_jira() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client.search(&request.jql, request.max_results).await {
            Ok((issues, total)) => {
                let summary =
                    McpFormatter::format_list_summary("issue", issues.len(), total as usize);
                success_response(
                    self.name(),
                    summary,
                    &serde_json::json!({
                        "total": total,
                        "issues": issues,
                    }),
                )
            }
            Err(error) => Ok(error_response(self.name(), Some(&request.jql), &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = SearchIssuesTool::new();
        assert_eq!(tool.name(), "jira_search_issues");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_zero_max_results_is_validation_error() {
        let tool = SearchIssuesTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("jql".to_string(), serde_json::json!("project = OPS"));
        arguments.insert("max_results".to_string(), serde_json::json!(0));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
