//! Model Context Protocol (MCP) server support
//!
//! This module provides the MCP server surface: one tool per adapter
//! operation, a shared registry, and the envelope builders every tool
//! answers with.

// Module declarations
pub mod asana_types;
pub mod bitbucket_types;
pub mod confluence_types;
pub mod jira_types;
pub mod responses;
pub mod server;
pub mod shared_utils;
pub mod testrail_types;
pub mod tool_registry;
pub mod tools;


// Re-export commonly used items from submodules
pub use responses::{error_response, success_response};
pub use server::McpServer;
pub use tool_registry::{
    register_all_tools, register_asana_tools, register_bitbucket_tools,
    register_confluence_tools, register_jira_tools, register_testrail_tools, ToolContext,
    ToolRegistry,
};
