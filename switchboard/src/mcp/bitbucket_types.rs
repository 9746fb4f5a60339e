//! Request types for Bitbucket Server MCP operations

use serde::{Deserialize, Serialize};

fn default_pr_state() -> String {
    "OPEN".to_string()
}

fn default_limit() -> u32 {
    25
}

/// Request to check Bitbucket connectivity and credentials
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct HealthcheckRequest {
    // No parameters needed for the health check
}

/// Request to fetch one pull request by its web URL
///
/// # Examples
///
/// ```ignore
/// GetPullRequestRequest {
///     pr_link: "https://git.example.com/projects/ING/repos/engine/pull-requests/42".to_string(),
///     include_diff: false,
/// }
/// ```
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetPullRequestRequest {
    /// Browser URL of the pull request
    pub pr_link: String,
    /// Also fetch the raw diff (may be large; truncated past 100k characters)
    #[serde(default)]
    pub include_diff: bool,
}

/// Request to open a new pull request
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CreatePullRequestRequest {
    /// Project key
    pub project: String,
    /// Repository slug
    pub repository: String,
    /// Pull request title
    pub title: String,
    /// Source branch name, without the refs/heads/ prefix
    pub source_branch: String,
    /// Target branch name, without the refs/heads/ prefix
    pub target_branch: String,
    /// Pull request description
    pub description: Option<String>,
    /// Reviewer user names
    #[serde(default)]
    pub reviewers: Vec<String>,
}

/// Request to comment on a pull request, optionally anchored to a diff line
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AddCommentRequest {
    /// Browser URL of the pull request
    pub pr_link: String,
    /// Comment text
    pub comment: String,
    /// File to anchor the comment to; requires line_number
    pub file_path: Option<String>,
    /// Line in the destination file to anchor to; requires file_path
    pub line_number: Option<u32>,
}

/// Request for pull requests a user is reviewing
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListReviewedPrsRequest {
    /// Reviewer user name
    pub username: String,
    /// Pull request state: OPEN, MERGED, DECLINED or ALL
    #[serde(default = "default_pr_state")]
    pub state: String,
    /// Maximum number of pull requests to return
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Request to list branches of a repository
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListBranchesRequest {
    /// Project key
    pub project: String,
    /// Repository slug
    pub repository: String,
    /// Substring filter on branch names
    pub filter: Option<String>,
    /// Maximum number of branches to return
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Request for the content of one file at a ref
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetFileContentRequest {
    /// Project key
    pub project: String,
    /// Repository slug
    pub repository: String,
    /// Path of the file within the repository
    pub file_path: String,
    /// Branch, tag or commit to read at; defaults to the default branch
    pub at_ref: Option<String>,
}
