//! MCP server implementation for serving service adapter tools

use std::sync::Arc;

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};

use crate::config::{ServiceName, SwitchboardConfig};
use crate::error::Result;

use super::tool_registry::{
    register_asana_tools, register_bitbucket_tools, register_confluence_tools,
    register_jira_tools, register_testrail_tools, ToolContext, ToolRegistry,
};

const INSTRUCTIONS: &str = "A stateless adapter server exposing Jira, Bitbucket Server, \
Confluence, Asana and TestRail over MCP. Tools are named <service>_<operation>; every \
response is a JSON envelope with a status field. Call <service>_healthcheck first to \
verify connectivity and credentials for a service.";

/// MCP server bridging tool calls to the configured service adapters
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing the per-service clients
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server exposing all five adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured service's HTTP client cannot be built.
    pub fn new(config: &SwitchboardConfig) -> Result<Self> {
        Self::with_services(config, &ServiceName::ALL)
    }

    /// Create a server exposing only the named adapters.
    ///
    /// Tools for unlisted services are not registered at all; tools for listed
    /// but unconfigured services register and answer with configuration errors.
    pub fn with_services(config: &SwitchboardConfig, services: &[ServiceName]) -> Result<Self> {
        let tool_context = Arc::new(ToolContext::from_config(config)?);

        let mut tool_registry = ToolRegistry::new();
        for service in services {
            match service {
                ServiceName::Jira => register_jira_tools(&mut tool_registry),
                ServiceName::Bitbucket => register_bitbucket_tools(&mut tool_registry),
                ServiceName::Confluence => register_confluence_tools(&mut tool_registry),
                ServiceName::Asana => register_asana_tools(&mut tool_registry),
                ServiceName::Testrail => register_testrail_tools(&mut tool_registry),
            }
        }

        tracing::debug!(
            "Tool registry initialized with {} tools",
            tool_registry.len()
        );

        Ok(Self {
            tool_registry: Arc::new(tool_registry),
            tool_context,
        })
    }

    /// Number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tool_registry.len()
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: None,
            tools: Some(ToolsCapability {
                list_changed: Some(true),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            instructions: Some(INSTRUCTIONS.into()),
            server_info: Implementation {
                name: "Switchboard".into(),
                version: crate::VERSION.into(),
            },
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if let Some(tool) = self.tool_registry.get_tool(&request.name) {
            tool.execute(request.arguments.unwrap_or_default(), &self.tool_context)
                .await
        } else {
            Err(McpError::invalid_request(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: "Switchboard".into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_server() -> McpServer {
        McpServer::new(&SwitchboardConfig::default()).expect("server builds without services")
    }

    #[test]
    fn test_server_registers_every_adapter_tool() {
        let server = empty_server();
        assert_eq!(server.tool_count(), 43);
    }

    #[test]
    fn test_server_with_single_service_registers_subset() {
        let server =
            McpServer::with_services(&SwitchboardConfig::default(), &[ServiceName::Confluence])
                .expect("server builds");
        assert_eq!(server.tool_count(), 5);

        let tools = server.tool_registry.list_tools();
        assert!(tools.iter().all(|t| t.name.starts_with("confluence_")));
    }

    #[test]
    fn test_tool_names_follow_service_prefix_convention() {
        let server = empty_server();
        let prefixes = ["jira_", "bitbucket_", "confluence_", "asana_", "testrail_"];

        for name in server.tool_registry.list_tool_names() {
            assert!(
                prefixes.iter().any(|p| name.starts_with(p)),
                "tool '{name}' has no service prefix"
            );
        }
    }

    #[test]
    fn test_every_registered_tool_has_schema_and_description() {
        let server = empty_server();
        for tool in server.tool_registry.list_tools() {
            assert!(
                tool.description.as_deref().is_some_and(|d| !d.is_empty()),
                "tool '{}' has an empty description",
                tool.name
            );
            assert!(
                tool.input_schema.contains_key("type"),
                "tool '{}' schema is not an object schema",
                tool.name
            );
        }
    }

    #[test]
    fn test_get_info_reports_tools_capability() {
        let server = empty_server();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "Switchboard");
    }
}
