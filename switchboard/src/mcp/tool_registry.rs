//! Tool registry for MCP operations
//!
//! Registry pattern for managing MCP tools: each adapter contributes a set of
//! boxed [`McpTool`] implementations keyed by name, and the server resolves
//! `call_tool` requests against the registry instead of a match statement.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::asana::AsanaClient;
use crate::bitbucket::BitbucketClient;
use crate::config::{ServiceName, SwitchboardConfig};
use crate::confluence::ConfluenceClient;
use crate::error::{Result, SwitchboardError};
use crate::jira::JiraClient;
use crate::testrail::TestRailClient;

/// Context shared by all tools during execution
///
/// Holds one client per configured service; tools for unconfigured services
/// stay registered and report a configuration error when invoked.
#[derive(Clone, Default)]
pub struct ToolContext {
    pub jira: Option<Arc<JiraClient>>,
    pub bitbucket: Option<Arc<BitbucketClient>>,
    pub confluence: Option<Arc<ConfluenceClient>>,
    pub asana: Option<Arc<AsanaClient>>,
    pub testrail: Option<Arc<TestRailClient>>,
}

impl ToolContext {
    /// Build clients for every service present in the configuration
    pub fn from_config(config: &SwitchboardConfig) -> Result<Self> {
        let mut context = Self::default();
        if let Some(jira) = &config.jira {
            context.jira = Some(Arc::new(JiraClient::new(jira)?));
        }
        if let Some(bitbucket) = &config.bitbucket {
            context.bitbucket = Some(Arc::new(BitbucketClient::new(bitbucket)?));
        }
        if let Some(confluence) = &config.confluence {
            context.confluence = Some(Arc::new(ConfluenceClient::new(confluence)?));
        }
        if let Some(asana) = &config.asana {
            context.asana = Some(Arc::new(AsanaClient::new(asana)?));
        }
        if let Some(testrail) = &config.testrail {
            context.testrail = Some(Arc::new(TestRailClient::new(testrail)?));
        }
        Ok(context)
    }

    pub fn require_jira(&self) -> Result<&JiraClient> {
        self.jira
            .as_deref()
            .ok_or_else(|| not_configured(ServiceName::Jira, "JIRA_BASE_URL and JIRA_AUTH_TOKEN"))
    }

    pub fn require_bitbucket(&self) -> Result<&BitbucketClient> {
        self.bitbucket.as_deref().ok_or_else(|| {
            not_configured(
                ServiceName::Bitbucket,
                "BITBUCKET_BASE_URL and BITBUCKET_AUTH_TOKEN",
            )
        })
    }

    pub fn require_confluence(&self) -> Result<&ConfluenceClient> {
        self.confluence.as_deref().ok_or_else(|| {
            not_configured(
                ServiceName::Confluence,
                "CONFLUENCE_BASE_URL and CONFLUENCE_AUTH_TOKEN",
            )
        })
    }

    pub fn require_asana(&self) -> Result<&AsanaClient> {
        self.asana
            .as_deref()
            .ok_or_else(|| not_configured(ServiceName::Asana, "ASANA_AUTH_TOKEN"))
    }

    pub fn require_testrail(&self) -> Result<&TestRailClient> {
        self.testrail.as_deref().ok_or_else(|| {
            not_configured(
                ServiceName::Testrail,
                "TESTRAIL_URL, TESTRAIL_USERNAME and TESTRAIL_API_KEY",
            )
        })
    }
}

fn not_configured(service: ServiceName, variables: &str) -> SwitchboardError {
    SwitchboardError::Configuration(format!("{service} is not configured; set {variables}"))
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }
}

/// Register every adapter's tools
pub fn register_all_tools(registry: &mut ToolRegistry) {
    register_jira_tools(registry);
    register_bitbucket_tools(registry);
    register_confluence_tools(registry);
    register_asana_tools(registry);
    register_testrail_tools(registry);
}

/// Register all Jira tools with the registry
pub fn register_jira_tools(registry: &mut ToolRegistry) {
    crate::mcp::tools::jira::register_jira_tools(registry);
}

/// Register all Bitbucket tools with the registry
pub fn register_bitbucket_tools(registry: &mut ToolRegistry) {
    crate::mcp::tools::bitbucket::register_bitbucket_tools(registry);
}

/// Register all Confluence tools with the registry
pub fn register_confluence_tools(registry: &mut ToolRegistry) {
    crate::mcp::tools::confluence::register_confluence_tools(registry);
}

/// Register all Asana tools with the registry
pub fn register_asana_tools(registry: &mut ToolRegistry) {
    crate::mcp::tools::asana::register_asana_tools(registry);
}

/// Register all TestRail tools with the registry
pub fn register_testrail_tools(registry: &mut ToolRegistry) {
    crate::mcp::tools::testrail::register_testrail_tools(registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct EchoRequest {
        text: String,
    }

    struct EchoTool;

    #[async_trait::async_trait]
    impl McpTool for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo the given text back"
        }

        fn schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }

        async fn execute(
            &self,
            arguments: serde_json::Map<String, serde_json::Value>,
            _context: &ToolContext,
        ) -> std::result::Result<CallToolResult, McpError> {
            let request: EchoRequest = BaseToolImpl::parse_arguments(arguments)?;
            Ok(crate::mcp::responses::success_response(
                "echo",
                request.text,
                &serde_json::json!({}),
            )?)
        }
    }

    #[test]
    fn test_registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(EchoTool);
        assert_eq!(registry.len(), 1);
        assert!(registry.get_tool("echo").is_some());
        assert!(registry.get_tool("missing").is_none());
        assert_eq!(registry.list_tool_names(), vec!["echo".to_string()]);
    }

    #[test]
    fn test_registry_exposes_tool_schemas() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let tools = registry.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
        assert!(tools[0].input_schema.contains_key("properties"));
    }

    #[test]
    fn test_parse_arguments_rejects_wrong_shape() {
        let mut arguments = serde_json::Map::new();
        arguments.insert("text".to_string(), serde_json::json!(42));

        let result: std::result::Result<EchoRequest, McpError> =
            BaseToolImpl::parse_arguments(arguments);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_context_reports_configuration_errors() {
        let context = ToolContext::default();

        for result in [
            context.require_jira().err().map(|e| e.kind()),
            context.require_bitbucket().err().map(|e| e.kind()),
            context.require_confluence().err().map(|e| e.kind()),
            context.require_asana().err().map(|e| e.kind()),
            context.require_testrail().err().map(|e| e.kind()),
        ] {
            assert_eq!(result, Some("configuration"));
        }
    }

    #[test]
    fn test_missing_service_error_names_env_vars() {
        let context = ToolContext::default();
        let message = context.require_testrail().unwrap_err().to_string();
        assert!(message.contains("TESTRAIL_URL"));
        assert!(message.contains("TESTRAIL_API_KEY"));
    }
}
