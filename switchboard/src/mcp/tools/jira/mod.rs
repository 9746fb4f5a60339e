//! Jira tools for MCP operations
//!
//! This module provides all Jira-related tools using the tool registry pattern.
//! Each tool is in its own submodule with dedicated implementation and description.

pub mod create_issue;
pub mod get_issue;
pub mod get_issue_pull_requests;
pub mod get_sprint_status;
pub mod healthcheck;
pub mod list_projects;
pub mod search_issues;
pub mod update_issue;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all Jira tools with the registry
pub fn register_jira_tools(registry: &mut ToolRegistry) {
    registry.register(healthcheck::JiraHealthcheckTool::new());
    registry.register(get_issue::GetIssueTool::new());
    registry.register(search_issues::SearchIssuesTool::new());
    registry.register(create_issue::CreateIssueTool::new());
    registry.register(update_issue::UpdateIssueTool::new());
    registry.register(get_issue_pull_requests::GetIssuePullRequestsTool::new());
    registry.register(get_sprint_status::GetSprintStatusTool::new());
    registry.register(list_projects::ListProjectsTool::new());
}
