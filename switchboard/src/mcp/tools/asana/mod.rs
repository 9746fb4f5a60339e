//! Asana tools for MCP operations
//!
//! This module provides all Asana-related tools using the tool registry pattern.
//! Each tool is in its own submodule with dedicated implementation and description.

pub mod create_task;
pub mod get_portfolio_items;
pub mod get_task;
pub mod healthcheck;
pub mod list_portfolios;
pub mod list_projects;
pub mod list_tasks;
pub mod list_workspaces;
pub mod search_tasks;
pub mod update_task;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all Asana tools with the registry
pub fn register_asana_tools(registry: &mut ToolRegistry) {
    registry.register(healthcheck::AsanaHealthcheckTool::new());
    registry.register(list_workspaces::ListWorkspacesTool::new());
    registry.register(list_projects::ListProjectsTool::new());
    registry.register(list_tasks::ListTasksTool::new());
    registry.register(get_task::GetTaskTool::new());
    registry.register(create_task::CreateTaskTool::new());
    registry.register(update_task::UpdateTaskTool::new());
    registry.register(search_tasks::SearchTasksTool::new());
    registry.register(list_portfolios::ListPortfoliosTool::new());
    registry.register(get_portfolio_items::GetPortfolioItemsTool::new());
}
