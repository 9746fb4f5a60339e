//! TestRail bulk result recording tool for MCP operations

use crate::mcp::responses::{error_response, success_response};
use crate::mcp::testrail_types::AddResultsForCasesRequest;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for recording results for several cases of a run at once
#[derive(Default)]
pub struct AddResultsForCasesTool;

impl AddResultsForCasesTool {
    /// Creates a new instance of the AddResultsForCasesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddResultsForCasesTool {
    fn name(&self) -> &'static str {
        "testrail_add_results_for_cases"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "run_id": {
                    "type": "integer",
                    "description": "Run id to record against"
                },
                "results": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "case_id": {
                                "type": "integer",
                                "description": "Case id within the run"
                            },
                            "status_id": {
                                "type": "integer",
                                "description": "Result status: 1 passed, 2 blocked, 3 untested, 4 retest, 5 failed"
                            },
                            "comment": {
                                "type": ["string", "null"],
                                "description": "Result comment"
                            },
                            "version": {
                                "type": ["string", "null"],
                                "description": "Version the test ran against"
                            },
                            "elapsed": {
                                "type": ["string", "null"],
                                "description": "Elapsed time, e.g. \"30s\""
                            },
                            "defects": {
                                "type": ["string", "null"],
                                "description": "Linked defect references"
                            }
                        },
                        "required": ["case_id", "status_id"]
                    },
                    "description": "Results, one per case; at least one required"
                }
            },
            "required": ["run_id", "results"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddResultsForCasesRequest = BaseToolImpl::parse_arguments(arguments)?;

        tracing::debug!(
            "Recording {} results for TestRail run R{}",
            request.results.len(),
            request.run_id
        );

        let client = match context.require_testrail() {
            Ok(client) => client,
            Err(error) => return Ok(error_response(self.name(), None, &error)),
        };

        // Empty lists and bad status ids are rejected by the client.
        let results: Vec<crate::testrail::CaseResult> = request
            .results
            .iter()
            .map(|entry| crate::testrail::CaseResult {
                case_id: entry.case_id,
                status_id: entry.status_id,
                comment: entry.comment.clone(),
                version: entry.version.clone(),
                elapsed: entry.elapsed.clone(),
                defects: entry.defects.clone(),
            })
            .collect();

        match client.add_results_for_cases(request.run_id, &results).await {
            Ok(recorded) => success_response(
                self.name(),
                format!(
                    "Recorded {} results for run R{}",
                    recorded.len(),
                    request.run_id
                ),
                &serde_json::json!({ "results": recorded }),
            ),
            Err(error) => Ok(error_response(
                self.name(),
                Some(&request.run_id.to_string()),
                &error,
            )),
        }
    }
}
