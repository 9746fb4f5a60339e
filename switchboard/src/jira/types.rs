//! Normalized Jira records returned by [`JiraClient`](super::JiraClient)

use std::collections::BTreeMap;

use serde::Serialize;

/// Fields present only on bug-type issues
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugDetails {
    pub steps_to_reproduce: String,
    pub expected_result: String,
    pub actual_result: String,
    pub severity: String,
    pub detected_in: String,
    pub root_cause: String,
}

/// A fully mapped issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub description: String,
    pub status: String,
    pub issue_type: String,
    pub priority: String,
    pub assignee: String,
    pub reporter: String,
    pub created: String,
    pub updated: String,
    pub labels: Vec<String>,
    pub components: Vec<String>,
    pub fix_version: String,
    pub story_points: f64,
    pub sprint: String,
    pub epic_link: String,
    pub acceptance_criteria: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bug: Option<BugDetails>,
}

/// The compact issue shape used by search results and sprint listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueSummary {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub issue_type: String,
    pub priority: String,
    pub assignee: String,
    pub created: String,
    pub updated: String,
    pub story_points: f64,
    pub sprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedIssue {
    pub key: String,
    pub id: String,
    pub url: String,
}

/// What an update call actually changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateReceipt {
    pub key: String,
    pub updated_fields: Vec<String>,
    pub comment_added: bool,
}

/// Pull request rollup parsed out of the development-summary custom field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevSummary {
    pub pr_count: u64,
    pub state: String,
    pub open_count: u64,
    pub merged_count: u64,
    pub declined_count: u64,
    pub last_updated: String,
}

/// Story points summed per workflow bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoryPointBreakdown {
    pub done: f64,
    pub in_progress: f64,
    pub in_review: f64,
    pub in_qa: f64,
    pub to_do: f64,
    pub total: f64,
}

/// The active sprint of a board, with its issues
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: String,
    pub start_date: String,
    pub end_date: String,
    pub goal: String,
    pub issues: Vec<IssueSummary>,
    pub status_counts: BTreeMap<String, u64>,
    pub story_points: StoryPointBreakdown,
}

/// Sprint lookup result; `sprint` is `None` when the board has no active one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintStatus {
    pub board_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<Sprint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub lead: String,
    pub project_type: String,
    pub category: String,
    pub url: String,
}

/// The authenticated identity, used by the health check probe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentUser {
    pub name: String,
    pub display_name: String,
    pub email: String,
}
