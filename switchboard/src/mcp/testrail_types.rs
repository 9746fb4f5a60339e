//! Request types for TestRail MCP operations

use serde::{Deserialize, Serialize};

use crate::testrail::CaseStep;

fn default_run_status() -> String {
    "active".to_string()
}

fn default_include_all() -> bool {
    true
}

/// Request to check TestRail connectivity and credentials
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct HealthcheckRequest {
    // No parameters needed for the health check
}

/// Request to list projects
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    /// Case-insensitive filter on project names
    pub search_term: Option<String>,
}

/// Request to fetch one project
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetProjectRequest {
    /// Project id
    pub project_id: u64,
}

/// Request to list test cases of a project
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListCasesRequest {
    /// Project id
    pub project_id: u64,
    /// Restrict to one suite
    pub suite_id: Option<u64>,
    /// Restrict to one section
    pub section_id: Option<u64>,
    /// Case-insensitive filter on title and description
    pub search_term: Option<String>,
}

/// Request to fetch one test case with step detail
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetCaseRequest {
    /// Case id
    pub case_id: u64,
}

/// Request to create a test case in a section
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AddCaseRequest {
    /// Section to create the case in
    pub section_id: u64,
    /// Case title
    pub title: String,
    /// Template id
    pub template_id: Option<u64>,
    /// Case type id
    pub type_id: Option<u64>,
    /// Priority id
    pub priority_id: Option<u64>,
    /// References, e.g. linked issue keys
    pub refs: Option<String>,
    /// Case description
    pub description: Option<String>,
    /// Steps as one text block
    pub steps: Option<String>,
    /// Expected result as one text block
    pub expected: Option<String>,
    /// Steps as structured step/expected pairs
    #[serde(default)]
    pub steps_separated: Vec<CaseStep>,
}

/// Request to update fields of an existing test case
///
/// At least one of the optional fields must be present.
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct UpdateCaseRequest {
    /// Case id to update
    pub case_id: u64,
    /// New title
    pub title: Option<String>,
    /// New template id
    pub template_id: Option<u64>,
    /// New case type id
    pub type_id: Option<u64>,
    /// New priority id
    pub priority_id: Option<u64>,
    /// New references
    pub refs: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New steps text block
    pub steps: Option<String>,
    /// New expected result text block
    pub expected: Option<String>,
    /// Replacement structured steps
    pub steps_separated: Option<Vec<CaseStep>>,
}

/// Request to list sections of a project
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListSectionsRequest {
    /// Project id
    pub project_id: u64,
    /// Restrict to one suite
    pub suite_id: Option<u64>,
}

/// Request to list test runs of a project
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListRunsRequest {
    /// Project id
    pub project_id: u64,
    /// Run state filter: "active", "completed" or "all"
    #[serde(default = "default_run_status")]
    pub status: String,
    /// Restrict to runs created by this user id
    pub created_by: Option<u64>,
}

/// Request to create a test run
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AddRunRequest {
    /// Project id
    pub project_id: u64,
    /// Suite the run is built from
    pub suite_id: u64,
    /// Run name
    pub name: String,
    /// Run description
    pub description: Option<String>,
    /// Include every case of the suite; set false to pick case_ids
    #[serde(default = "default_include_all")]
    pub include_all: bool,
    /// Cases to include when include_all is false
    #[serde(default)]
    pub case_ids: Vec<u64>,
    /// Milestone to attach the run to
    pub milestone_id: Option<u64>,
    /// User id to assign the run to
    pub assignedto_id: Option<u64>,
}

/// Request to close a run, locking its results
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CloseRunRequest {
    /// Run id to close
    pub run_id: u64,
}

/// Request to record a result against a test
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AddResultRequest {
    /// Test id (a case instance within a run)
    pub test_id: u64,
    /// Result status: 1 passed, 2 blocked, 3 untested, 4 retest, 5 failed
    pub status_id: u64,
    /// Result comment
    pub comment: Option<String>,
    /// Version the test ran against
    pub version: Option<String>,
    /// Elapsed time, e.g. "30s" or "2m 30s"
    pub elapsed: Option<String>,
    /// Linked defect references
    pub defects: Option<String>,
    /// User id to assign the test to
    pub assignedto_id: Option<u64>,
}

/// One entry of a bulk result submission
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CaseResultEntry {
    /// Case id within the run
    pub case_id: u64,
    /// Result status: 1 passed, 2 blocked, 3 untested, 4 retest, 5 failed
    pub status_id: u64,
    /// Result comment
    pub comment: Option<String>,
    /// Version the test ran against
    pub version: Option<String>,
    /// Elapsed time, e.g. "30s"
    pub elapsed: Option<String>,
    /// Linked defect references
    pub defects: Option<String>,
}

/// Request to record results for several cases of a run at once
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AddResultsForCasesRequest {
    /// Run id to record against
    pub run_id: u64,
    /// Results, one per case; at least one required
    #[serde(default)]
    pub results: Vec<CaseResultEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_runs_defaults_to_active() {
        let request: ListRunsRequest =
            serde_json::from_value(serde_json::json!({ "project_id": 7 }))
                .expect("deserializes");
        assert_eq!(request.status, "active");
        assert!(request.created_by.is_none());
    }

    #[test]
    fn test_add_run_defaults_include_all() {
        let request: AddRunRequest = serde_json::from_value(serde_json::json!({
            "project_id": 7,
            "suite_id": 3,
            "name": "Regression 2.4",
        }))
        .expect("deserializes");
        assert!(request.include_all);
        assert!(request.case_ids.is_empty());
    }

    #[test]
    fn test_add_case_accepts_structured_steps() {
        let request: AddCaseRequest = serde_json::from_value(serde_json::json!({
            "section_id": 12,
            "title": "Login succeeds",
            "steps_separated": [
                { "content": "Open the login page", "expected": "Form is shown" },
                { "content": "Submit valid credentials", "expected": "Dashboard loads" },
            ],
        }))
        .expect("deserializes");
        assert_eq!(request.steps_separated.len(), 2);
        assert_eq!(request.steps_separated[0].content, "Open the login page");
    }

    #[test]
    fn test_bulk_results_entries_deserialize() {
        let request: AddResultsForCasesRequest = serde_json::from_value(serde_json::json!({
            "run_id": 99,
            "results": [
                { "case_id": 1, "status_id": 1 },
                { "case_id": 2, "status_id": 5, "comment": "Crash on step 3" },
            ],
        }))
        .expect("deserializes");
        assert_eq!(request.results.len(), 2);
        assert_eq!(request.results[1].status_id, 5);
    }
}
