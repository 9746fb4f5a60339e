//! Bitbucket Server tools for MCP operations
//!
//! This module provides all Bitbucket-related tools using the tool registry
//! pattern. Each tool is in its own submodule with dedicated implementation
//! and description.

pub mod add_comment;
pub mod create_pull_request;
pub mod get_file_content;
pub mod get_pull_request;
pub mod healthcheck;
pub mod list_branches;
pub mod list_reviewed_prs;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all Bitbucket tools with the registry
pub fn register_bitbucket_tools(registry: &mut ToolRegistry) {
    registry.register(healthcheck::BitbucketHealthcheckTool::new());
    registry.register(get_pull_request::GetPullRequestTool::new());
    registry.register(create_pull_request::CreatePullRequestTool::new());
    registry.register(add_comment::AddCommentTool::new());
    registry.register(list_reviewed_prs::ListReviewedPrsTool::new());
    registry.register(list_branches::ListBranchesTool::new());
    registry.register(get_file_content::GetFileContentTool::new());
}
