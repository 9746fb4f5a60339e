//! TestRail run creation tool for MCP operations

use crate::error::SwitchboardError;
use crate::mcp::responses::{error_response, success_response};
use crate::mcp::shared_utils::McpValidation;
use crate::mcp::testrail_types::AddRunRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for creating a test run
#[derive(Default)]
pub struct AddRunTool;

impl AddRunTool {
    /// Creates a new instance of the AddRunTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddRunTool {
    fn name(&self) -> &'static str {
        "testrail_add_run"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_id": {
                    "type": "integer",
                    "description": "Project id"
                },
                "suite_id": {
                    "type": "integer",
                    "description": "Suite the run is built from"
                },
                "name": {
                    "type": "string",
                    "description": "Run name"
                },
                "description": {
                    "type": ["string", "null"],
                    "description": "Run description"
                },
                "include_all": {
                    "type": "boolean",
                    "description": "Include every case of the suite (default true); set false to pick case_ids"
                },
                "case_ids": {
                    "type": ["array", "null"],
                    "items": { "type": "integer" },
                    "description": "Cases to include when include_all is false"
                },
                "milestone_id": {
                    "type": ["integer", "null"],
                    "description": "Milestone to attach the run to"
                },
                "assignedto_id": {
                    "type": ["integer", "null"],
                    "description": "User id to assign the run to"
                }
            },
            "required": ["project_id", "suite_id", "name"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddRunRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!("Creating TestRail run '{}'", request.name);

        if let Err(error) = McpValidation::validate_not_empty(&request.name, "name") {
            return Ok(error_response(self.name(), None, &error));
        }
        if !request.include_all && request.case_ids.is_empty() {
            let error = SwitchboardError::Validation(
                "Case ids are required when include_all is false".to_string(),
            );
            return Ok(error_response(self.name(), None, &error));
        }

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        let new_run = crate::testrail::NewRun {
            suite_id: request.suite_id,
            name: request.name.clone(),
            description: request.description.clone(),
            include_all: request.include_all,
            case_ids: request.case_ids.clone(),
            milestone_id: request.milestone_id,
            assignedto_id: request.assignedto_id,
        };

        match client.add_run(request.project_id, &new_run).await {
            Ok(run) => success_response(
                self.name(),
                format!("Created run R{} ({})", run.id, run.name),
                &run,
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.project_id.to_string()),
                &error,
            )),
        }
    }
}
