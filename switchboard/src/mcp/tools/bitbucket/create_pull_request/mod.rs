//! Bitbucket pull request creation tool for MCP operations

use crate::bitbucket::NewPullRequest;
use crate::mcp::bitbucket_types::CreatePullRequestRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for opening a new pull request
#[derive(Default)]
pub struct CreatePullRequestTool;

impl CreatePullRequestTool {
    /// Creates a new instance of the CreatePullRequestTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreatePullRequestTool {
    fn name(&self) -> &'static str {
        "bitbucket_create_pull_request"
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
                "title": {
                    "type": "string",
                    "description": "Pull request title"
                },
                "source_branch": {
                    "type": "string",
                    "description": "Source branch name, without refs/heads/"
                },
                "target_branch": {
                    "type": "string",
                    "description": "Target branch name, without refs/heads/"
                },
                "description": {
                    "type": ["string", "null"],
                    "description": "Pull request description"
                },
                "reviewers": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Reviewer user names"
                }
            },
            "required": ["project", "repository", "title", "source_branch", "target_branch"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreatePullRequestRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.project, "project")
            .and_then(|_| McpValidation::validate_not_empty(&request.repository, "repository"))
            .and_then(|_| McpValidation::validate_not_empty(&request.title, "title"))
            .and_then(|_| {
                McpValidation::validate_not_empty(&request.source_branch, "source branch")
            })
            .and_then(|_| {
                McpValidation::validate_not_empty(&request.target_branch, "target branch")
            })
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_bitbucket() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        let new_pr = NewPullRequest {
            project: request.project,
            repository: request.repository,
            title: request.title,
            source_branch: request.source_branch,
            target_branch: request.target_branch,
            description: request.description,
            reviewers: request.reviewers,
        };

        match client.create_pull_request(&new_pr).await {
            Ok(created) => {
                tracing::info!("Created pull request #{}", created.id);
                success_response(
                    self.name(),
                    format!("Created pull request #{}", created.id),
                    &created,
                )
            }
            Err(error) => Ok(error_response(self.name(), None, &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = CreatePullRequestTool::new();
        assert_eq!(tool.name(), "bitbucket_create_pull_request");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_blank_branch_is_validation_error() {
        let tool = CreatePullRequestTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert("project".to_string(), serde_json::json!("ING"));
        arguments.insert("repository".to_string(), serde_json::json!("engine"));
        arguments.insert("title".to_string(), serde_json::json!("Fix crash"));
        arguments.insert("source_branch".to_string(), serde_json::json!(""));
        arguments.insert("target_branch".to_string(), serde_json::json!("main"));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
