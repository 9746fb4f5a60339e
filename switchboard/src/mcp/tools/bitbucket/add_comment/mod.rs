//! Bitbucket pull request comment tool for MCP operations

use crate::bitbucket::CommentAnchor;
use crate::error::SwitchboardError;
use crate::mcp::bitbucket_types::AddCommentRequest;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for commenting on a pull request
#[derive(Default)]
pub struct AddCommentTool;

impl AddCommentTool {
    /// Creates a new instance of the AddCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddCommentTool {
    fn name(&self) -> &'static str {
        "bitbucket_add_comment"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pr_link": {
                    "type": "string",
                    "description": "Browser URL of the pull request"
                },
                "comment": {
                    "type": "string",
                    "description": "Comment text"
                },
                "file_path": {
                    "type": ["string", "null"],
                    "description": "File to anchor the comment to; requires line_number"
                },
                "line_number": {
                    "type": ["integer", "null"],
                    "description": "Line in the destination file; requires file_path"
                }
            },
            "required": ["pr_link", "comment"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddCommentRequest = BaseToolImpl::parse_arguments(arguments)?;

        if let Err(error) = McpValidation::validate_not_empty(&request.pr_link, "pull request link")
            .and_then(|_| McpValidation::validate_not_empty(&request.comment, "comment"))
        {
            return Ok(error_response(self.name(), None, &error));
        }

        // An anchor needs both halves; one without the other is a caller bug
        let anchor = match (&request.file_path, request.line_number) {
            (Some(file_path), Some(line)) => Some(CommentAnchor {
                file_path: file_path.clone(),
                line,
            }),
            (None, None) => None,
            _ => {
                let error = SwitchboardError::Validation(
                    "file_path and line_number must be given together".to_string(),
                );
                return Ok(error_response(self.name(), None, &error));
            }
        };

        let client = match context.require_bitbucket() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        match client
            .add_comment(&request.pr_link, &request.comment, anchor)
            .await
        {
            Ok(receipt) => {
                let message = if receipt.anchored {
                    format!("Added anchored comment {}", receipt.id)
                } else {
                    format!("Added comment {}", receipt.id)
                };
                success_response(self.name(), message, &receipt)
            }
            Err(error) => Ok(error_response(self.name(), Some(&request.pr_link), &error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = AddCommentTool::new();
        assert_eq!(tool.name(), "bitbucket_add_comment");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_half_anchor_is_validation_error() {
        let tool = AddCommentTool::new();
        let mut arguments = serde_json::Map::new();
        arguments.insert(
            "pr_link".to_string(),
            serde_json::json!("https://git.example.com/projects/A/repos/b/pull-requests/1"),
        );
        arguments.insert("comment".to_string(), serde_json::json!("typo here"));
        arguments.insert("file_path".to_string(), serde_json::json!("src/lib.rs"));

        let result = tool
            .execute(arguments, &ToolContext::default())
            .await
            .expect("envelope, not protocol error");
        assert_eq!(result.is_error, Some(true));
    }
}
