//! Normalized TestRail records

use serde::{Deserialize, Serialize};

/// The authenticated identity, used by the health check probe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub announcement: String,
    pub is_completed: bool,
    pub url: String,
}

/// A case row as returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSummary {
    pub id: u64,
    pub title: String,
    pub section_id: u64,
    pub priority_id: u64,
    pub type_id: u64,
    pub refs: String,
    pub description: String,
}

/// One step of a separated-steps case
///
/// Also accepted as input when creating or updating a case, so this one
/// record type derives both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CaseStep {
    pub content: String,
    pub expected: String,
}

/// A full case, including the step fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    pub id: u64,
    pub title: String,
    pub section_id: u64,
    pub priority_id: u64,
    pub type_id: u64,
    pub refs: String,
    pub description: String,
    pub steps: String,
    pub expected: String,
    pub steps_separated: Vec<CaseStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    pub parent_id: u64,
    pub depth: u64,
    pub suite_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub id: u64,
    pub name: String,
    pub is_completed: bool,
    pub passed_count: u64,
    pub failed_count: u64,
    pub blocked_count: u64,
    pub untested_count: u64,
    pub url: String,
}

/// A recorded test result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub id: u64,
    pub test_id: u64,
    pub status_id: u64,
    pub comment: String,
}
