//! Request types for Jira MCP operations

use serde::{Deserialize, Serialize};

fn default_max_results() -> u32 {
    50
}

/// Request to check Jira connectivity and credentials
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct HealthcheckRequest {
    // No parameters needed for the health check
}

/// Request to fetch one issue with all fields
///
/// # Examples
///
/// ```ignore
/// GetIssueRequest {
///     issue_key: "INGN-1000".to_string(),
/// }
/// ```
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetIssueRequest {
    /// Issue key, e.g. "INGN-1000"
    pub issue_key: String,
}

/// Request to run a JQL search
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SearchIssuesRequest {
    /// JQL query to execute
    pub jql: String,
    /// Maximum number of issues to return
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// Request to create a new issue
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CreateIssueRequest {
    /// Project key; falls back to the configured default project
    pub project_key: Option<String>,
    /// Issue type name, e.g. "Story" or "Bug"
    pub issue_type: String,
    /// One-line summary
    pub summary: String,
    /// Issue description
    pub description: String,
    /// Assignee user name
    pub assignee: Option<String>,
    /// Labels to apply
    #[serde(default)]
    pub labels: Vec<String>,
    /// Priority name, e.g. "High"
    pub priority: Option<String>,
}

/// Request to update fields of an existing issue and/or add a comment
///
/// At least one of the optional fields must be present.
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct UpdateIssueRequest {
    /// Issue key to update
    pub issue_key: String,
    /// New summary
    pub summary: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New assignee user name; empty string unassigns
    pub assignee: Option<String>,
    /// Replacement label list
    pub labels: Option<Vec<String>>,
    /// Comment to add
    pub comment: Option<String>,
}

/// Request for the pull-request development summary of an issue
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetIssuePullRequestsRequest {
    /// Issue key, e.g. "INGN-1000"
    pub issue_key: String,
}

/// Request for the active sprint of a board
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetSprintStatusRequest {
    /// Agile board id
    pub board_id: String,
}

/// Request to list visible projects
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    /// Case-insensitive filter on project key and name
    pub search_term: Option<String>,
    /// Maximum number of projects to return
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults_max_results() {
        let request: SearchIssuesRequest =
            serde_json::from_value(serde_json::json!({ "jql": "project = OPS" }))
                .expect("deserializes");
        assert_eq!(request.max_results, 50);
    }

    #[test]
    fn test_create_request_defaults_optional_fields() {
        let request: CreateIssueRequest = serde_json::from_value(serde_json::json!({
            "issue_type": "Bug",
            "summary": "Crash on save",
            "description": "Steps to reproduce attached",
        }))
        .expect("deserializes");

        assert!(request.project_key.is_none());
        assert!(request.labels.is_empty());
        assert!(request.priority.is_none());
    }

    #[test]
    fn test_update_request_requires_issue_key() {
        let result: Result<UpdateIssueRequest, _> =
            serde_json::from_value(serde_json::json!({ "summary": "New summary" }));
        assert!(result.is_err());
    }
}
