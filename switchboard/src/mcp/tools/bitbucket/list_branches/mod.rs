//! Bitbucket branch listing tool for MCP operations

use crate::mcp::bitbucket_types::ListBranchesRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing branches of a repository
#[derive(Default)]
pub struct ListBranchesTool;

impl ListBranchesTool {
    /// Creates a new instance of the ListBranchesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListBranchesTool {
    fn name(&self) -> &'static str {
        "bitbucket_list_branches"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project": {
                    "type": "string",
                    "description": "Project key"
                },
                "repository": {
                    "type": "string",
                    "description": "Repository slug"
                },
                "filter": {
                    "type": ["string", "null"],
                    "description": "Substring filter on branch names"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of branches to return (default 25)"
                }
            },
            "required": ["project", "repository"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListBranchesRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.project, "project")
            .and_then(|_| McpValidation::validate_not_empty(&request.repository, "repository"))
            .and_then(|_| McpValidation::validate_limit(request.limit, "limit"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_bitbucket() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .branches(
                &request.project,
                &request.repository,
                request.filter.as_deref(),
                request.limit,
            )
            .await
        {
            Ok((branches, total)) => {
                // "branch" does not pluralize with a bare "s"
                let message = if branches.len() as u64 >= total {
                    format!("Found {} branches", branches.len())
                } else {
                    format!("Showing {} of {} branches", branches.len(), total)
                };
                success_response(
                    self.name(),
                    message,
                    &serde_json::json!({
                        "total": total,
                        "branches": branches,
                    }),
                )
            }
            Err(error) => Ok(error_response(
                self.name(),
                Some(&format!("{}/{}", request.project, request.repository)),
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
        let tool = ListBranchesTool::new();
        assert_eq!(tool.name(), "bitbucket_list_branches");
        assert!(!tool.description().is_empty());
    }
}
