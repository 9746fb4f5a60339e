//! # Switchboard
//!
//! Stateless MCP adapters for the trackers a development team already runs:
//! Jira, Bitbucket Server, Confluence, Asana and TestRail.
//!
//! ## Features
//!
//! - **Link and identifier parsing**: Turn pasted browser URLs into API
//!   coordinates before any network call
//! - **One transport layer**: Shared HTTP client with bearer and basic auth,
//!   timeouts and uniform error classification
//! - **Response mapping**: Raw vendor JSON reduced to stable shapes with
//!   sentinel defaults for absent fields
//! - **MCP tools**: Every operation exposed as a named tool with a JSON
//!   schema and structured success/error envelopes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use switchboard::config::SwitchboardConfig;
//! use switchboard::mcp::McpServer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Read service configuration from the environment
//! let config = SwitchboardConfig::from_env()?;
//!
//! // Build the server; unconfigured services answer with configuration errors
//! let server = McpServer::new(&config)?;
//! println!("serving {} tools", server.tool_count());
//! # Ok(())
//! # }
//! ```

/// Service configuration read from the environment
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Shared HTTP transport with auth and error classification
pub mod http;

/// Safe traversal helpers for raw vendor JSON
pub mod json_path;

/// Markdown and storage-format conversion for wiki page bodies
pub mod markdown;

/// Jira adapter: links, issues, sprints and dev-status
pub mod jira;

/// Bitbucket Server adapter: pull requests, branches and files
pub mod bitbucket;

/// Confluence adapter: pages and spaces
pub mod confluence;

/// Asana adapter: workspaces, projects, tasks and portfolios
pub mod asana;

/// TestRail adapter: projects, cases, runs and results
pub mod testrail;

/// Model Context Protocol (MCP) server support
pub mod mcp;

// Re-export core types
pub use config::{Credential, ServiceConfig, ServiceName, SwitchboardConfig};
pub use error::{Result, SwitchboardError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asana::AsanaClient;
    pub use crate::bitbucket::BitbucketClient;
    pub use crate::confluence::ConfluenceClient;
    pub use crate::jira::JiraClient;
    pub use crate::testrail::TestRailClient;
    pub use crate::{Credential, Result, ServiceConfig, ServiceName, SwitchboardConfig, SwitchboardError};

    pub use crate::mcp::{McpServer, ToolContext, ToolRegistry};
}
