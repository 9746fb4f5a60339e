//! Request types for Asana MCP operations

use serde::{Deserialize, Serialize};

fn default_search_limit() -> u32 {
    25
}

/// Request to check Asana connectivity and credentials
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct HealthcheckRequest {
    // No parameters needed for the health check
}

/// Request to list workspaces visible to the token
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListWorkspacesRequest {
    // No parameters needed for listing workspaces
}

/// Request to list projects in a workspace
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    /// Workspace gid; falls back to the configured default workspace
    pub workspace_gid: Option<String>,
    /// Include archived projects
    #[serde(default)]
    pub archived: bool,
}

/// Request to list tasks of a project
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListTasksRequest {
    /// Project gid
    pub project_gid: String,
    /// Only tasks incomplete or completed since this ISO-8601 time
    pub completed_since: Option<String>,
}

/// Request to fetch one task with full detail
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetTaskRequest {
    /// Task gid
    pub task_gid: String,
}

/// Request to create a task in a project
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CreateTaskRequest {
    /// Task name
    pub name: String,
    /// Project gid to add the task to
    pub project_gid: String,
    /// Task notes (plain text)
    pub notes: Option<String>,
    /// Assignee gid or email
    pub assignee: Option<String>,
    /// Due date, YYYY-MM-DD
    pub due_on: Option<String>,
}

/// Request to update fields of an existing task
///
/// At least one of the optional fields must be present.
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct UpdateTaskRequest {
    /// Task gid to update
    pub task_gid: String,
    /// New name
    pub name: Option<String>,
    /// New notes
    pub notes: Option<String>,
    /// Mark the task complete or incomplete
    pub completed: Option<bool>,
    /// New assignee gid or email
    pub assignee: Option<String>,
    /// New due date, YYYY-MM-DD
    pub due_on: Option<String>,
}

/// Request to search tasks by text within a workspace
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SearchTasksRequest {
    /// Search text
    pub query: String,
    /// Workspace gid; falls back to the configured default workspace
    pub workspace_gid: Option<String>,
    /// Maximum number of tasks to return
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

/// Request to list portfolios owned by a user
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListPortfoliosRequest {
    /// Workspace gid; falls back to the configured default workspace
    pub workspace_gid: Option<String>,
    /// Portfolio owner gid or email; defaults to the authenticated user
    pub owner: Option<String>,
}

/// Request for the projects inside a portfolio
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetPortfolioItemsRequest {
    /// Portfolio gid
    pub portfolio_gid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_projects_defaults_archived_off() {
        let request: ListProjectsRequest =
            serde_json::from_value(serde_json::json!({})).expect("deserializes");
        assert!(!request.archived);
        assert!(request.workspace_gid.is_none());
    }

    #[test]
    fn test_search_request_defaults_limit() {
        let request: SearchTasksRequest =
            serde_json::from_value(serde_json::json!({ "query": "launch" }))
                .expect("deserializes");
        assert_eq!(request.limit, 25);
    }

    #[test]
    fn test_update_request_requires_task_gid() {
        let result: Result<UpdateTaskRequest, _> =
            serde_json::from_value(serde_json::json!({ "name": "Renamed" }));
        assert!(result.is_err());
    }
}
