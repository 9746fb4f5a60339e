//! Confluence tools for MCP operations
//!
//! This module provides all Confluence-related tools using the tool registry pattern.
//! Each tool is in its own submodule with dedicated implementation and description.

pub mod create_page;
pub mod get_page;
pub mod healthcheck;
pub mod list_spaces;
pub mod search_pages;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all Confluence tools with the registry
pub fn register_confluence_tools(registry: &mut ToolRegistry) {
    registry.register(healthcheck::ConfluenceHealthcheckTool::new());
    registry.register(search_pages::SearchPagesTool::new());
    registry.register(list_spaces::ListSpacesTool::new());
    registry.register(get_page::GetPageTool::new());
    registry.register(create_page::CreatePageTool::new());
}
