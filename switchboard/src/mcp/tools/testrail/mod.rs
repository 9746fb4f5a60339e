//! TestRail tools for MCP operations
//!
//! This module provides all TestRail-related tools using the tool registry pattern.
//! Each tool is in its own submodule with dedicated implementation and description.

pub mod add_case;
pub mod add_result;
pub mod add_results_for_cases;
pub mod add_run;
pub mod close_run;
pub mod get_case;
pub mod get_project;
pub mod healthcheck;
pub mod list_cases;
pub mod list_projects;
pub mod list_runs;
pub mod list_sections;
pub mod update_case;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all TestRail tools with the registry
pub fn register_testrail_tools(registry: &mut ToolRegistry) {
    registry.register(healthcheck::TestRailHealthcheckTool::new());
    registry.register(list_projects::ListProjectsTool::new());
    registry.register(get_project::GetProjectTool::new());
    registry.register(list_cases::ListCasesTool::new());
    registry.register(get_case::GetCaseTool::new());
    registry.register(add_case::AddCaseTool::new());
    registry.register(update_case::UpdateCaseTool::new());
    registry.register(list_sections::ListSectionsTool::new());
    registry.register(list_runs::ListRunsTool::new());
    registry.register(add_run::AddRunTool::new());
    registry.register(close_run::CloseRunTool::new());
    registry.register(add_result::AddResultTool::new());
    registry.register(add_results_for_cases::AddResultsForCasesTool::new());
}
