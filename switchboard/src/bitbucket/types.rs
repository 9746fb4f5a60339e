//! Normalized Bitbucket Server records
//!
//! Flat, predictable shapes produced by the response mappers. Optional
//! upstream fields are already sentinel-filled here; `serde` serialization
//! of these structs is exactly what tool callers receive.

use serde::Serialize;

/// A user attached to a pull request (author, reviewer, or participant)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestUser {
    pub name: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub approved: bool,
    pub status: String,
    /// Only reviewers carry the commit they last reviewed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_commit: Option<String>,
}

/// Repository coordinates attached to a branch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryInfo {
    pub slug: String,
    pub name: String,
    pub project_key: String,
    pub project_name: String,
}

/// One side of a pull request (source or target)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchInfo {
    /// Display name, e.g. `feature/login`
    pub name: String,
    /// Full ref id, e.g. `refs/heads/feature/login`
    pub id: String,
    pub latest_commit: String,
    pub repository: RepositoryInfo,
}

/// Raw diff text attached to a pull request on request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffPayload {
    pub text: String,
    /// True when the diff was cut at the size guard
    pub truncated: bool,
}

/// Full pull request view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub state: String,
    pub open: bool,
    pub closed: bool,
    pub locked: bool,
    /// Millisecond epochs as reported by the server; 0 when absent
    pub created: i64,
    pub updated: i64,
    pub version: i64,
    pub author: PullRequestUser,
    pub reviewers: Vec<PullRequestUser>,
    pub participants: Vec<PullRequestUser>,
    pub source_branch: BranchInfo,
    pub target_branch: BranchInfo,
    pub link: String,
    /// Ticket id extracted from the title or description, `Unknown` if none
    pub jira_issue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffPayload>,
}

/// Compact row for review-dashboard listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestSummary {
    pub id: u64,
    pub title: String,
    pub state: String,
    pub author: String,
    pub project: String,
    pub repo: String,
    pub link: String,
}

/// A branch in a repository listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub id: String,
    pub display_id: String,
    pub latest_commit: String,
    pub is_default: bool,
}

/// Result of creating a pull request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedPullRequest {
    pub id: u64,
    pub version: i64,
    pub state: String,
    pub link: String,
}

/// Result of adding a comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentReceipt {
    pub id: u64,
    /// True when the comment was anchored to a file and line
    pub anchored: bool,
}

/// Server identity returned by the health probe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerProperties {
    pub version: String,
    pub display_name: String,
}
