//! Bitbucket Server adapter
//!
//! Pull request reads and writes against the `/rest/api/1.0` API: fetching a
//! PR (optionally with its raw diff), opening PRs, commenting (plain or
//! anchored to a file and line), the reviewer dashboard, branch listings and
//! raw file content. Input links are parsed by [`links`]; responses are
//! flattened into the [`types`] records with sentinel defaults.

pub mod links;
pub mod types;

pub use links::{extract_ticket_id, parse_pull_request_url, PullRequestRef};
pub use types::{
    Branch, BranchInfo, CommentReceipt, CreatedPullRequest, DiffPayload, PullRequest,
    PullRequestSummary, PullRequestUser, RepositoryInfo, ServerProperties,
};

use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::error::{Result, SwitchboardError};
use crate::http::{ApiClient, AuthScheme};
use crate::json_path::{self, UNKNOWN};

/// Diffs beyond this many characters are cut and flagged as truncated
const DIFF_CHAR_LIMIT: usize = 100_000;

/// Parameters for opening a pull request
#[derive(Debug, Clone)]
pub struct NewPullRequest {
    pub project: String,
    pub repository: String,
    pub title: String,
    pub source_branch: String,
    pub target_branch: String,
    pub description: Option<String>,
    pub reviewers: Vec<String>,
}

/// A file/line position for an anchored review comment
#[derive(Debug, Clone)]
pub struct CommentAnchor {
    pub file_path: String,
    pub line: u32,
}

/// Client for one Bitbucket Server deployment
pub struct BitbucketClient {
    api: ApiClient,
}

impl BitbucketClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.api.auth_scheme()
    }

    /// Minimal authenticated probe for the health check
    pub async fn probe(&self) -> Result<ServerProperties> {
        let raw = self
            .api
            .get_json("rest/api/1.0/application-properties", &[])
            .await?;
        Ok(ServerProperties {
            version: json_path::str_at(&raw, &["version"], UNKNOWN),
            display_name: json_path::str_at(&raw, &["displayName"], UNKNOWN),
        })
    }

    /// Fetch one pull request by link, optionally with its raw diff
    pub async fn get_pull_request(&self, link: &str, include_diff: bool) -> Result<PullRequest> {
        let pr_ref = parse_pull_request_url(link)?;
        tracing::debug!("fetching pull request {}", pr_ref);

        let raw = self.api.get_json(&pr_ref.api_path(), &[]).await?;
        let mut pull_request = map_pull_request(&raw)?;

        if include_diff {
            let diff_path = format!("{}.diff", pr_ref.api_path());
            let text = self.api.get_text(&diff_path, &[]).await?;
            pull_request.diff = Some(truncate_diff(text));
        }

        Ok(pull_request)
    }

    /// Open a pull request from one branch to another
    pub async fn create_pull_request(&self, request: &NewPullRequest) -> Result<CreatedPullRequest> {
        let reviewers: Vec<Value> = request
            .reviewers
            .iter()
            .map(|name| json!({ "user": { "name": name } }))
            .collect();

        let payload = json!({
            "title": request.title,
            "description": request.description.clone().unwrap_or_default(),
            "state": "OPEN",
            "open": true,
            "closed": false,
            "locked": false,
            "fromRef": {
                "id": format!("refs/heads/{}", request.source_branch),
                "repository": {
                    "slug": request.repository,
                    "project": { "key": request.project }
                }
            },
            "toRef": {
                "id": format!("refs/heads/{}", request.target_branch),
                "repository": {
                    "slug": request.repository,
                    "project": { "key": request.project }
                }
            },
            "reviewers": reviewers,
        });

        let path = format!(
            "rest/api/1.0/projects/{}/repos/{}/pull-requests",
            request.project, request.repository
        );
        let raw = self.api.post_json(&path, &payload).await?;

        let id = json_path::lookup(&raw, &["id"])
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                SwitchboardError::MalformedResponse(
                    "create pull request response missing numeric 'id'".to_string(),
                )
            })?;

        Ok(CreatedPullRequest {
            id,
            version: json_path::i64_at(&raw, &["version"], 0),
            state: json_path::str_at(&raw, &["state"], UNKNOWN),
            link: json_path::str_at(&raw, &["links", "self", "0", "href"], ""),
        })
    }

    /// Comment on a pull request, optionally anchored to a changed line
    pub async fn add_comment(
        &self,
        link: &str,
        text: &str,
        anchor: Option<CommentAnchor>,
    ) -> Result<CommentReceipt> {
        let pr_ref = parse_pull_request_url(link)?;

        let mut payload = json!({ "text": text });
        let anchored = anchor.is_some();
        if let Some(anchor) = anchor {
            // TO/ADDED anchors the comment to the destination side of the diff
            payload["anchor"] = json!({
                "path": anchor.file_path,
                "line": anchor.line,
                "lineType": "ADDED",
                "fileType": "TO",
            });
        }

        let path = format!("{}/comments", pr_ref.api_path());
        let raw = self.api.post_json(&path, &payload).await?;

        let id = json_path::lookup(&raw, &["id"])
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                SwitchboardError::MalformedResponse(
                    "comment response missing numeric 'id'".to_string(),
                )
            })?;

        Ok(CommentReceipt { id, anchored })
    }

    /// Pull requests where `username` is a reviewer, via the dashboard API
    pub async fn reviewed_pull_requests(
        &self,
        username: &str,
        state: &str,
        limit: u32,
    ) -> Result<(Vec<PullRequestSummary>, u64)> {
        let query = [
            ("role.1", "REVIEWER".to_string()),
            ("username.1", username.to_string()),
            ("state", state.to_string()),
            ("limit", limit.to_string()),
        ];
        let raw = self
            .api
            .get_json("rest/api/1.0/dashboard/pull-requests", &query)
            .await?;

        let rows = json_path::list_at(&raw, &["values"])
            .iter()
            .map(map_pull_request_summary)
            .collect();
        let total = json_path::u64_at(&raw, &["size"], 0);
        Ok((rows, total))
    }

    /// Branches of one repository, optionally filtered by name substring
    pub async fn branches(
        &self,
        project: &str,
        repository: &str,
        filter: Option<&str>,
        limit: u32,
    ) -> Result<(Vec<Branch>, u64)> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(filter) = filter {
            query.push(("filterText", filter.to_string()));
        }

        let path = format!("rest/api/1.0/projects/{project}/repos/{repository}/branches");
        let raw = self.api.get_json(&path, &query).await?;

        let branches = json_path::list_at(&raw, &["values"])
            .iter()
            .map(|value| Branch {
                id: json_path::str_at(value, &["id"], UNKNOWN),
                display_id: json_path::str_at(value, &["displayId"], UNKNOWN),
                latest_commit: json_path::str_at(value, &["latestCommit"], UNKNOWN),
                is_default: json_path::bool_at(value, &["isDefault"], false),
            })
            .collect();
        let total = json_path::u64_at(&raw, &["size"], 0);
        Ok((branches, total))
    }

    /// Raw file content at a ref, via the browse API
    pub async fn file_content(
        &self,
        project: &str,
        repository: &str,
        file_path: &str,
        at_ref: Option<&str>,
    ) -> Result<String> {
        let mut query = Vec::new();
        if let Some(at) = at_ref {
            query.push(("at", at.to_string()));
        }

        let path = format!(
            "rest/api/1.0/projects/{project}/repos/{repository}/browse/{}",
            file_path.trim_start_matches('/')
        );
        let raw = self.api.get_json(&path, &query).await?;

        match json_path::lookup(&raw, &["lines"]) {
            Some(_) => {
                let lines: Vec<String> = json_path::list_at(&raw, &["lines"])
                    .iter()
                    .map(|line| json_path::str_at(line, &["text"], ""))
                    .collect();
                Ok(lines.join("\n"))
            }
            None => Err(SwitchboardError::MalformedResponse(format!(
                "browse response for '{file_path}' has no 'lines' field"
            ))),
        }
    }
}

fn truncate_diff(text: String) -> DiffPayload {
    if text.chars().count() <= DIFF_CHAR_LIMIT {
        DiffPayload {
            text,
            truncated: false,
        }
    } else {
        DiffPayload {
            text: text.chars().take(DIFF_CHAR_LIMIT).collect(),
            truncated: true,
        }
    }
}

/// Map one raw pull request document. Fails only when the numeric `id` is
/// missing; every other field falls back to its sentinel.
fn map_pull_request(raw: &Value) -> Result<PullRequest> {
    let id = json_path::lookup(raw, &["id"])
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            SwitchboardError::MalformedResponse(
                "pull request response missing numeric 'id'".to_string(),
            )
        })?;

    let title = json_path::str_at(raw, &["title"], "");
    let description = json_path::str_at(raw, &["description"], "");

    let reviewers = json_path::list_at(raw, &["reviewers"])
        .iter()
        .map(|value| map_participant(value, true))
        .collect();
    let participants = json_path::list_at(raw, &["participants"])
        .iter()
        .map(|value| map_participant(value, false))
        .collect();

    let jira_issue = extract_ticket_id(&title)
        .or_else(|| extract_ticket_id(&description))
        .unwrap_or_else(|| UNKNOWN.to_string());

    Ok(PullRequest {
        id,
        state: json_path::str_at(raw, &["state"], UNKNOWN),
        open: json_path::bool_at(raw, &["open"], false),
        closed: json_path::bool_at(raw, &["closed"], false),
        locked: json_path::bool_at(raw, &["locked"], false),
        created: json_path::i64_at(raw, &["createdDate"], 0),
        updated: json_path::i64_at(raw, &["updatedDate"], 0),
        version: json_path::i64_at(raw, &["version"], 0),
        author: map_participant(
            json_path::lookup(raw, &["author"]).unwrap_or(&Value::Null),
            false,
        ),
        reviewers,
        participants,
        source_branch: map_branch(json_path::lookup(raw, &["fromRef"]).unwrap_or(&Value::Null)),
        target_branch: map_branch(json_path::lookup(raw, &["toRef"]).unwrap_or(&Value::Null)),
        link: json_path::str_at(raw, &["links", "self", "0", "href"], ""),
        jira_issue,
        diff: None,
        title,
        description,
    })
}

fn map_participant(value: &Value, with_last_reviewed: bool) -> PullRequestUser {
    PullRequestUser {
        name: json_path::str_at(value, &["user", "name"], UNKNOWN),
        display_name: json_path::str_at(value, &["user", "displayName"], UNKNOWN),
        email: json_path::str_at(value, &["user", "emailAddress"], UNKNOWN),
        role: json_path::str_at(value, &["role"], UNKNOWN),
        approved: json_path::bool_at(value, &["approved"], false),
        status: json_path::str_at(value, &["status"], UNKNOWN),
        last_reviewed_commit: if with_last_reviewed {
            Some(json_path::str_at(value, &["lastReviewedCommit"], UNKNOWN))
        } else {
            None
        },
    }
}

fn map_branch(value: &Value) -> BranchInfo {
    BranchInfo {
        name: json_path::str_at(value, &["displayId"], UNKNOWN),
        id: json_path::str_at(value, &["id"], UNKNOWN),
        latest_commit: json_path::str_at(value, &["latestCommit"], UNKNOWN),
        repository: RepositoryInfo {
            slug: json_path::str_at(value, &["repository", "slug"], UNKNOWN),
            name: json_path::str_at(value, &["repository", "name"], UNKNOWN),
            project_key: json_path::str_at(value, &["repository", "project", "key"], UNKNOWN),
            project_name: json_path::str_at(value, &["repository", "project", "name"], UNKNOWN),
        },
    }
}

fn map_pull_request_summary(value: &Value) -> PullRequestSummary {
    PullRequestSummary {
        id: json_path::u64_at(value, &["id"], 0),
        title: json_path::str_at(value, &["title"], ""),
        state: json_path::str_at(value, &["state"], UNKNOWN),
        author: json_path::str_at(value, &["author", "user", "displayName"], UNKNOWN),
        project: json_path::str_at(value, &["toRef", "repository", "project", "key"], UNKNOWN),
        repo: json_path::str_at(value, &["toRef", "repository", "slug"], UNKNOWN),
        link: json_path::str_at(value, &["links", "self", "0", "href"], ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_pr() -> Value {
        json!({
            "id": 866,
            "title": "INGN-2045 tighten retry loop",
            "description": "See INGN-1999 for background",
            "state": "OPEN",
            "open": true,
            "closed": false,
            "locked": false,
            "createdDate": 1700000000000i64,
            "updatedDate": 1700000500000i64,
            "version": 4,
            "author": {
                "user": { "name": "dana", "displayName": "Dana Q", "emailAddress": "dana@example.com" },
                "role": "AUTHOR",
                "approved": false,
                "status": "UNAPPROVED"
            },
            "reviewers": [{
                "user": { "name": "sam", "displayName": "Sam R", "emailAddress": "sam@example.com" },
                "role": "REVIEWER",
                "approved": true,
                "status": "APPROVED",
                "lastReviewedCommit": "abc123"
            }],
            "participants": [],
            "fromRef": {
                "id": "refs/heads/feature/retries",
                "displayId": "feature/retries",
                "latestCommit": "abc123",
                "repository": {
                    "slug": "ingn_api",
                    "name": "INGN API",
                    "project": { "key": "INGN", "name": "Ingestion" }
                }
            },
            "toRef": {
                "id": "refs/heads/main",
                "displayId": "main",
                "latestCommit": "def456",
                "repository": {
                    "slug": "ingn_api",
                    "name": "INGN API",
                    "project": { "key": "INGN", "name": "Ingestion" }
                }
            },
            "links": { "self": [ { "href": "https://git.example.com/projects/INGN/repos/ingn_api/pull-requests/866" } ] }
        })
    }

    #[test]
    fn test_map_full_pull_request() {
        let pr = map_pull_request(&full_pr()).expect("maps");

        assert_eq!(pr.id, 866);
        assert_eq!(pr.author.display_name, "Dana Q");
        assert_eq!(pr.reviewers.len(), 1);
        assert_eq!(
            pr.reviewers[0].last_reviewed_commit.as_deref(),
            Some("abc123")
        );
        assert!(pr.author.last_reviewed_commit.is_none());
        assert_eq!(pr.source_branch.name, "feature/retries");
        assert_eq!(pr.source_branch.repository.project_key, "INGN");
        assert_eq!(pr.jira_issue, "INGN-2045");
        assert!(pr.link.ends_with("/866"));
    }

    #[test]
    fn test_map_minimal_pull_request_fills_sentinels() {
        let pr = map_pull_request(&json!({ "id": 7 })).expect("maps");

        assert_eq!(pr.id, 7);
        assert_eq!(pr.title, "");
        assert_eq!(pr.state, UNKNOWN);
        assert_eq!(pr.author.display_name, UNKNOWN);
        assert_eq!(pr.source_branch.name, UNKNOWN);
        assert_eq!(pr.source_branch.repository.slug, UNKNOWN);
        assert_eq!(pr.jira_issue, UNKNOWN);
        assert!(pr.reviewers.is_empty());
        assert_eq!(pr.created, 0);
    }

    #[test]
    fn test_map_missing_id_is_malformed_response() {
        let err = map_pull_request(&json!({ "title": "no id here" })).unwrap_err();
        assert!(matches!(err, SwitchboardError::MalformedResponse(_)));
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let raw = full_pr();
        let first = map_pull_request(&raw).expect("first");
        let second = map_pull_request(&raw).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn test_jira_issue_falls_back_to_description() {
        let mut raw = full_pr();
        raw["title"] = json!("tighten retry loop");
        let pr = map_pull_request(&raw).expect("maps");
        assert_eq!(pr.jira_issue, "INGN-1999");
    }

    #[test]
    fn test_truncate_diff_flags_oversize() {
        let small = truncate_diff("short diff".to_string());
        assert!(!small.truncated);

        let big = truncate_diff("x".repeat(DIFF_CHAR_LIMIT + 5));
        assert!(big.truncated);
        assert_eq!(big.text.chars().count(), DIFF_CHAR_LIMIT);
    }

    #[test]
    fn test_map_summary_row() {
        let row = json!({
            "id": 42,
            "title": "OPS-1 fix",
            "state": "OPEN",
            "author": { "user": { "displayName": "Dana Q" } },
            "toRef": { "repository": { "slug": "deploy", "project": { "key": "OPS" } } },
            "links": { "self": [ { "href": "https://git.example.com/x" } ] }
        });
        let summary = map_pull_request_summary(&row);
        assert_eq!(summary.id, 42);
        assert_eq!(summary.project, "OPS");
        assert_eq!(summary.repo, "deploy");
        assert_eq!(summary.author, "Dana Q");
    }
}
