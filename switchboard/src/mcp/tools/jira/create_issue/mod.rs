//! Jira issue creation tool for MCP operations

use crate::jira::NewIssue;
use crate::mcp::jira_types::CreateIssueRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for creating a new Jira issue
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "jira_create_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_key": {
                    "type": ["string", "null"],
                    "description": "Project key; defaults to the configured default project"
                },
                "issue_type": {
                    "type": "string",
                    "description": "Issue type name, e.g. Story or Bug"
                },
                "summary": {
                    "type": "string",
                    "description": "One-line summary"
                },
                "description": {
                    "type": "string",
                    "description": "Issue description"
                },
                "assignee": {
                    "type": ["string", "null"],
                    "description": "Assignee user name"
                },
                "labels": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Labels to apply"
                },
                "priority": {
                    "type": ["string", "null"],
                    "description": "Priority name, e.g. High"
                }
            },
            "required": ["issue_type", "summary", "description"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Creating Jira issue: {}", request.summary);

        if let Err(error) = McpValidation::validate_not_empty(&request.issue_type, "issue type")
            .and_then(|_| McpValidation::validate_not_empty(&request.summary, "summary"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_jira() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        let new_issue = NewIssue {
            project_key: request.project_key,
            issue_type: request.issue_type,
            summary: request.summary,
            description: request.description,
            assignee: request.assignee,
            labels: request.labels,
            priority: request.priority,
        };

        match client.create_issue(&new_issue).await {
            Ok(created) => {
                tracing::info!("Created Jira issue {}", created.key);
                success_response(
                    self.name(),
                    format!("Created issue {}", created.key),
                    &created,
                )
            }
            Err(error) => Ok(error_response(self.name(), None, &error)),
        }
    }
}
