//! Jira adapter
//!
//! Issue reads and writes against `/rest/api/2`, plus the agile API for
//! sprint lookups. Responses are flattened into the [`types`] records with
//! sentinel defaults; site-specific custom field ids are collected as
//! constants at the top of this module.

pub mod types;

pub use types::{
    BugDetails, CreatedIssue, CurrentUser, DevSummary, Issue, IssueSummary, Project, Sprint,
    SprintStatus, StoryPointBreakdown, UpdateReceipt,
};

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use crate::config::ServiceConfig;
use crate::error::{Result, SwitchboardError};
use crate::http::{ApiClient, AuthScheme};
use crate::json_path::{self, UNASSIGNED, UNKNOWN};

// Custom field ids of the Jira deployment this adapter targets
const FIELD_STORY_POINTS: &str = "customfield_10121";
const FIELD_ACCEPTANCE_CRITERIA: &str = "customfield_10253";
const FIELD_SEVERITY: &str = "customfield_11947";
const FIELD_ROOT_CAUSE: &str = "customfield_12049";
const FIELD_SPRINT: &str = "customfield_13543";
const FIELD_EPIC_LINK: &str = "customfield_13544";
const FIELD_DETECTED_IN: &str = "customfield_14849";
const FIELD_DEV_SUMMARY: &str = "customfield_25440";
const FIELD_STEPS_TO_REPRODUCE: &str = "customfield_25647";
const FIELD_EXPECTED_RESULT: &str = "customfield_26140";
const FIELD_ACTUAL_RESULT: &str = "customfield_27140";

/// Sprint entries arrive as opaque toString dumps; the name lives in a
/// `name=...` segment terminated by a comma or closing bracket.
static SPRINT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"name=([^,\]]+)").expect("sprint name pattern"));

static DEV_SUMMARY_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""devSummaryJson"\s*:\s*"(.*?)"(?:,|\s*\})"#).expect("dev summary pattern"));

static PR_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r#""count":\s*(\d+)"#).expect("count pattern"));
static PR_STATE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""state":\s*"([^"]*)""#).expect("state pattern"));
static PR_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#""openCount":\s*(\d+)"#).expect("open pattern"));
static PR_MERGED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""mergedCount":\s*(\d+)"#).expect("merged pattern"));
static PR_DECLINED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""declinedCount":\s*(\d+)"#).expect("declined pattern"));

/// Parameters for creating an issue
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project_key: Option<String>,
    pub issue_type: String,
    pub summary: String,
    pub description: String,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    pub priority: Option<String>,
}

/// Field changes to apply to an existing issue. `assignee: Some("")`
/// unassigns the issue.
#[derive(Debug, Clone, Default)]
pub struct IssueUpdate {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub labels: Option<Vec<String>>,
    pub comment: Option<String>,
}

impl IssueUpdate {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.labels.is_none()
            && self.comment.is_none()
    }
}

/// Client for one Jira deployment
pub struct JiraClient {
    api: ApiClient,
    default_project: Option<String>,
}

impl JiraClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            default_project: config.default_container.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.api.auth_scheme()
    }

    pub fn default_project(&self) -> Option<&str> {
        self.default_project.as_deref()
    }

    /// Minimal authenticated probe for the health check
    pub async fn probe(&self) -> Result<CurrentUser> {
        let raw = self.api.get_json("rest/api/2/myself", &[]).await?;
        Ok(CurrentUser {
            name: json_path::str_at(&raw, &["name"], UNKNOWN),
            display_name: json_path::str_at(&raw, &["displayName"], UNKNOWN),
            email: json_path::str_at(&raw, &["emailAddress"], UNKNOWN),
        })
    }

    pub async fn get_issue(&self, issue_key: &str) -> Result<Issue> {
        let path = format!("rest/api/2/issue/{issue_key}");
        let raw = self
            .api
            .get_json(&path, &[("fields", "*all".to_string())])
            .await?;
        map_issue(&raw)
    }

    /// Run a JQL query; returns the mapped page and the server-side total
    pub async fn search(&self, jql: &str, max_results: u32) -> Result<(Vec<IssueSummary>, u64)> {
        let fields = [
            "key",
            "summary",
            "status",
            "issuetype",
            "priority",
            "assignee",
            "created",
            "updated",
            FIELD_STORY_POINTS,
            FIELD_SPRINT,
        ]
        .join(",");
        let query = [
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
            ("fields", fields),
        ];
        let raw = self.api.get_json("rest/api/2/search", &query).await?;

        let issues = json_path::list_at(&raw, &["issues"])
            .iter()
            .map(map_issue_summary)
            .collect();
        let total = json_path::u64_at(&raw, &["total"], 0);
        Ok((issues, total))
    }

    pub async fn create_issue(&self, request: &NewIssue) -> Result<CreatedIssue> {
        let project_key = request
            .project_key
            .clone()
            .or_else(|| self.default_project.clone())
            .ok_or_else(|| {
                SwitchboardError::Validation(
                    "no project key given and no default project is configured".to_string(),
                )
            })?;

        let mut fields = Map::new();
        fields.insert("project".into(), json!({ "key": project_key }));
        fields.insert("issuetype".into(), json!({ "name": request.issue_type }));
        fields.insert("summary".into(), json!(request.summary));
        fields.insert("description".into(), json!(request.description));
        if let Some(assignee) = &request.assignee {
            fields.insert("assignee".into(), json!({ "name": assignee }));
        }
        if !request.labels.is_empty() {
            fields.insert("labels".into(), json!(request.labels));
        }
        if let Some(priority) = &request.priority {
            fields.insert("priority".into(), json!({ "name": priority }));
        }

        let raw = self
            .api
            .post_json("rest/api/2/issue", &json!({ "fields": fields }))
            .await?;

        let key = json_path::opt_str_at(&raw, &["key"]).ok_or_else(|| {
            SwitchboardError::MalformedResponse("create issue response missing 'key'".to_string())
        })?;
        Ok(CreatedIssue {
            url: format!("{}/browse/{}", self.api.base_url(), key),
            key,
            id: json_path::str_at(&raw, &["id"], UNKNOWN),
        })
    }

    /// Apply field edits (expects an empty 204 reply) and optionally add a
    /// comment afterwards
    pub async fn update_issue(&self, issue_key: &str, update: &IssueUpdate) -> Result<UpdateReceipt> {
        if update.is_empty() {
            return Err(SwitchboardError::Validation(
                "update requires at least one field or a comment".to_string(),
            ));
        }

        let mut fields = Map::new();
        let mut updated_fields = Vec::new();
        if let Some(summary) = &update.summary {
            fields.insert("summary".into(), json!(summary));
            updated_fields.push("summary".to_string());
        }
        if let Some(description) = &update.description {
            fields.insert("description".into(), json!(description));
            updated_fields.push("description".to_string());
        }
        if let Some(assignee) = &update.assignee {
            // An empty assignee means unassign
            let value = if assignee.is_empty() {
                Value::Null
            } else {
                json!({ "name": assignee })
            };
            fields.insert("assignee".into(), value);
            updated_fields.push("assignee".to_string());
        }
        if let Some(labels) = &update.labels {
            fields.insert("labels".into(), json!(labels));
            updated_fields.push("labels".to_string());
        }

        if !fields.is_empty() {
            let path = format!("rest/api/2/issue/{issue_key}");
            self.api
                .put_json(&path, &json!({ "fields": fields }))
                .await?;
        }

        let mut comment_added = false;
        if let Some(comment) = &update.comment {
            let path = format!("rest/api/2/issue/{issue_key}/comment");
            self.api
                .post_json(&path, &json!({ "body": comment }))
                .await?;
            comment_added = true;
        }

        Ok(UpdateReceipt {
            key: issue_key.to_string(),
            updated_fields,
            comment_added,
        })
    }

    /// Pull request rollup from the development-summary custom field
    pub async fn issue_pull_requests(&self, issue_key: &str) -> Result<DevSummary> {
        let path = format!("rest/api/2/issue/{issue_key}");
        let raw = self.api.get_json(&path, &[]).await?;

        let field = json_path::opt_str_at(&raw, &["fields", FIELD_DEV_SUMMARY]);
        match field {
            Some(text) if !text.is_empty() => Ok(parse_dev_summary(&text)),
            _ => Ok(DevSummary {
                pr_count: 0,
                state: "NONE".to_string(),
                open_count: 0,
                merged_count: 0,
                declined_count: 0,
                last_updated: UNKNOWN.to_string(),
            }),
        }
    }

    /// Active sprint of a board with its issues and per-status rollups
    pub async fn sprint_status(&self, board_id: &str) -> Result<SprintStatus> {
        let path = format!("rest/agile/1.0/board/{board_id}/sprint");
        let raw = self
            .api
            .get_json(&path, &[("state", "active".to_string())])
            .await?;

        let sprints = json_path::list_at(&raw, &["values"]);
        let Some(active) = sprints.first() else {
            return Ok(SprintStatus {
                board_id: board_id.to_string(),
                sprint: None,
            });
        };

        let sprint_id = json_path::lookup(active, &["id"])
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                SwitchboardError::MalformedResponse(
                    "sprint response missing numeric 'id'".to_string(),
                )
            })?;

        let issues_path = format!("rest/agile/1.0/sprint/{sprint_id}/issue");
        let issues_raw = self
            .api
            .get_json(&issues_path, &[("maxResults", "500".to_string())])
            .await?;

        let issues: Vec<IssueSummary> = json_path::list_at(&issues_raw, &["issues"])
            .iter()
            .map(map_issue_summary)
            .collect();

        let mut status_counts = BTreeMap::new();
        let mut points = StoryPointBreakdown::default();
        for issue in &issues {
            *status_counts.entry(issue.status.clone()).or_insert(0) += 1;
            let bucket = match classify_status(&issue.status) {
                StatusBucket::Done => &mut points.done,
                StatusBucket::InProgress => &mut points.in_progress,
                StatusBucket::InReview => &mut points.in_review,
                StatusBucket::InQa => &mut points.in_qa,
                StatusBucket::ToDo => &mut points.to_do,
            };
            *bucket += issue.story_points;
            points.total += issue.story_points;
        }

        Ok(SprintStatus {
            board_id: board_id.to_string(),
            sprint: Some(Sprint {
                id: sprint_id,
                name: json_path::str_at(active, &["name"], UNKNOWN),
                state: json_path::str_at(active, &["state"], UNKNOWN),
                start_date: json_path::str_at(active, &["startDate"], UNKNOWN),
                end_date: json_path::str_at(active, &["endDate"], UNKNOWN),
                goal: json_path::str_at(active, &["goal"], ""),
                issues,
                status_counts,
                story_points: points,
            }),
        })
    }

    /// All visible projects, filtered client side
    pub async fn list_projects(
        &self,
        search_term: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<Project>> {
        let raw = self.api.get_json("rest/api/2/project", &[]).await?;

        // Either a bare array or a paged wrapper, depending on version
        let rows: Vec<&Value> = match &raw {
            Value::Array(items) => items.iter().collect(),
            _ => json_path::list_at(&raw, &["values"]).iter().collect(),
        };

        let projects = rows
            .into_iter()
            .filter(|project| match search_term {
                Some(needle) => project_matches(project, needle),
                None => true,
            })
            .take(max_results)
            .map(|project| Project {
                id: json_path::str_at(project, &["id"], UNKNOWN),
                key: json_path::str_at(project, &["key"], UNKNOWN),
                name: json_path::str_at(project, &["name"], UNKNOWN),
                description: json_path::str_at(project, &["description"], ""),
                lead: json_path::str_at(project, &["lead", "displayName"], UNKNOWN),
                project_type: json_path::str_at(project, &["projectTypeKey"], UNKNOWN),
                category: json_path::str_at(project, &["projectCategory", "name"], UNKNOWN),
                url: json_path::str_at(project, &["self"], ""),
            })
            .collect();
        Ok(projects)
    }
}

enum StatusBucket {
    Done,
    InProgress,
    InReview,
    InQa,
    ToDo,
}

fn classify_status(status: &str) -> StatusBucket {
    match status.to_lowercase().as_str() {
        "done" | "closed" | "resolved" => StatusBucket::Done,
        "in progress" | "development" | "in development" => StatusBucket::InProgress,
        "in review" | "code review" | "peer review" => StatusBucket::InReview,
        "in qa" | "testing" | "qa" | "in test" => StatusBucket::InQa,
        _ => StatusBucket::ToDo,
    }
}

fn project_matches(project: &Value, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [&["key"][..], &["name"], &["description"]]
        .iter()
        .any(|path| {
            json_path::opt_str_at(project, path)
                .map(|text| text.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
}

/// Sprint custom field entries are strings like
/// `...Sprint@1a2b[id=9,state=ACTIVE,name=Sprint 42,startDate=...]`
fn extract_sprint_name(fields: &Value) -> String {
    json_path::list_at(fields, &[FIELD_SPRINT])
        .first()
        .and_then(|entry| entry.as_str())
        .and_then(|entry| SPRINT_NAME.captures(entry))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Map one raw issue document. Fails only when `key` is missing; every other
/// field falls back to its sentinel.
fn map_issue(raw: &Value) -> Result<Issue> {
    let key = json_path::opt_str_at(raw, &["key"]).ok_or_else(|| {
        SwitchboardError::MalformedResponse("issue response missing 'key'".to_string())
    })?;

    let issue_type = json_path::str_at(raw, &["fields", "issuetype", "name"], UNKNOWN);
    let bug = if issue_type.eq_ignore_ascii_case("bug") {
        Some(BugDetails {
            steps_to_reproduce: json_path::str_at(raw, &["fields", FIELD_STEPS_TO_REPRODUCE], ""),
            expected_result: json_path::str_at(raw, &["fields", FIELD_EXPECTED_RESULT], ""),
            actual_result: json_path::str_at(raw, &["fields", FIELD_ACTUAL_RESULT], ""),
            severity: json_path::str_at(raw, &["fields", FIELD_SEVERITY, "value"], UNKNOWN),
            detected_in: json_path::str_at(raw, &["fields", FIELD_DETECTED_IN, "value"], UNKNOWN),
            root_cause: json_path::str_at(raw, &["fields", FIELD_ROOT_CAUSE, "value"], UNKNOWN),
        })
    } else {
        None
    };

    let components = json_path::list_at(raw, &["fields", "components"])
        .iter()
        .filter_map(|component| json_path::opt_str_at(component, &["name"]))
        .collect();

    Ok(Issue {
        key,
        summary: json_path::str_at(raw, &["fields", "summary"], ""),
        description: json_path::str_at(raw, &["fields", "description"], ""),
        status: json_path::str_at(raw, &["fields", "status", "name"], UNKNOWN),
        priority: json_path::str_at(raw, &["fields", "priority", "name"], UNKNOWN),
        assignee: json_path::str_at(raw, &["fields", "assignee", "name"], UNASSIGNED),
        reporter: json_path::str_at(raw, &["fields", "reporter", "displayName"], UNKNOWN),
        created: json_path::str_at(raw, &["fields", "created"], UNKNOWN),
        updated: json_path::str_at(raw, &["fields", "updated"], UNKNOWN),
        labels: json_path::string_list_at(raw, &["fields", "labels"]),
        components,
        fix_version: json_path::str_at(raw, &["fields", "fixVersions", "0", "name"], UNKNOWN),
        story_points: json_path::f64_at(raw, &["fields", FIELD_STORY_POINTS], 0.0),
        sprint: extract_sprint_name(&raw["fields"]),
        epic_link: json_path::str_at(raw, &["fields", FIELD_EPIC_LINK], UNKNOWN),
        acceptance_criteria: json_path::str_at(raw, &["fields", FIELD_ACCEPTANCE_CRITERIA], ""),
        issue_type,
        bug,
    })
}

fn map_issue_summary(raw: &Value) -> IssueSummary {
    IssueSummary {
        key: json_path::str_at(raw, &["key"], UNKNOWN),
        summary: json_path::str_at(raw, &["fields", "summary"], ""),
        status: json_path::str_at(raw, &["fields", "status", "name"], UNKNOWN),
        issue_type: json_path::str_at(raw, &["fields", "issuetype", "name"], UNKNOWN),
        priority: json_path::str_at(raw, &["fields", "priority", "name"], UNKNOWN),
        assignee: json_path::str_at(raw, &["fields", "assignee", "displayName"], UNASSIGNED),
        created: json_path::str_at(raw, &["fields", "created"], UNKNOWN),
        updated: json_path::str_at(raw, &["fields", "updated"], UNKNOWN),
        story_points: json_path::f64_at(raw, &["fields", FIELD_STORY_POINTS], 0.0),
        sprint: extract_sprint_name(&raw["fields"]),
    }
}

/// Parse the development-summary field text. Tries the embedded
/// `devSummaryJson` document first; falls back to counting with regexes when
/// the JSON is mangled. Never fails: an unreadable field maps to zeros.
fn parse_dev_summary(field: &str) -> DevSummary {
    if let Some(parsed) = DEV_SUMMARY_JSON
        .captures(field)
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str().replace("\\\"", "\"").replace("\\\\", "\\"))
        .and_then(|inner| serde_json::from_str::<Value>(&inner).ok())
    {
        let overall = json_path::lookup(&parsed, &["cachedValue", "summary", "pullrequest", "overall"])
            .unwrap_or(&Value::Null);
        return DevSummary {
            pr_count: json_path::u64_at(overall, &["count"], 0),
            state: json_path::str_at(overall, &["state"], UNKNOWN),
            open_count: json_path::u64_at(overall, &["details", "openCount"], 0),
            merged_count: json_path::u64_at(overall, &["details", "mergedCount"], 0),
            declined_count: json_path::u64_at(overall, &["details", "declinedCount"], 0),
            last_updated: json_path::str_at(overall, &["lastUpdated"], UNKNOWN),
        };
    }

    let capture_count = |pattern: &Regex| {
        pattern
            .captures(field)
            .and_then(|captures| captures.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
            .unwrap_or(0)
    };
    DevSummary {
        pr_count: capture_count(&PR_COUNT),
        state: PR_STATE
            .captures(field)
            .and_then(|captures| captures.get(1))
            .map(|state| state.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        open_count: capture_count(&PR_OPEN),
        merged_count: capture_count(&PR_MERGED),
        declined_count: capture_count(&PR_DECLINED),
        last_updated: UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn story_issue() -> Value {
        json!({
            "key": "INGN-2045",
            "fields": {
                "summary": "Tighten retry loop",
                "description": "The loop retries forever.",
                "status": { "name": "In Progress" },
                "issuetype": { "name": "Story" },
                "priority": { "name": "High" },
                "assignee": { "name": "dana", "displayName": "Dana Q" },
                "reporter": { "displayName": "Sam R" },
                "created": "2024-01-02T10:00:00.000+0000",
                "updated": "2024-01-05T09:30:00.000+0000",
                "labels": ["backend", "reliability"],
                "components": [ { "name": "ingestion" } ],
                "fixVersions": [ { "name": "2024.2" } ],
                "customfield_10121": 5,
                "customfield_13543": [
                    "com.atlassian.greenhopper.service.sprint.Sprint@77[id=9,rapidViewId=4,state=ACTIVE,name=Sprint 42,startDate=2024-01-01]"
                ],
                "customfield_13544": "INGN-1800",
                "customfield_10253": "Retries stop after three attempts."
            }
        })
    }

    #[test]
    fn test_map_story_issue() {
        let issue = map_issue(&story_issue()).expect("maps");

        assert_eq!(issue.key, "INGN-2045");
        assert_eq!(issue.status, "In Progress");
        assert_eq!(issue.assignee, "dana");
        assert_eq!(issue.fix_version, "2024.2");
        assert_eq!(issue.sprint, "Sprint 42");
        assert_eq!(issue.epic_link, "INGN-1800");
        assert_eq!(issue.story_points, 5.0);
        assert_eq!(issue.components, vec!["ingestion".to_string()]);
        assert!(issue.bug.is_none());
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let raw = story_issue();
        assert_eq!(
            map_issue(&raw).expect("maps"),
            map_issue(&raw).expect("maps")
        );
    }

    #[test]
    fn test_map_minimal_issue_fills_sentinels() {
        let issue = map_issue(&json!({ "key": "ABC-1", "fields": {} })).expect("maps");

        assert_eq!(issue.summary, "");
        assert_eq!(issue.status, UNKNOWN);
        assert_eq!(issue.assignee, UNASSIGNED);
        assert_eq!(issue.fix_version, UNKNOWN);
        assert_eq!(issue.sprint, UNKNOWN);
        assert_eq!(issue.story_points, 0.0);
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn test_map_null_assignee_is_unassigned() {
        let issue = map_issue(&json!({ "key": "ABC-2", "fields": { "assignee": null } }))
            .expect("maps");
        assert_eq!(issue.assignee, UNASSIGNED);
    }

    #[test]
    fn test_missing_key_is_malformed_response() {
        let err = map_issue(&json!({ "fields": { "summary": "no key" } })).unwrap_err();
        assert!(matches!(err, SwitchboardError::MalformedResponse(_)));
    }

    #[test]
    fn test_bug_issue_carries_bug_details() {
        let raw = json!({
            "key": "INGN-300",
            "fields": {
                "issuetype": { "name": "Bug" },
                "customfield_25647": "1. Open the page",
                "customfield_26140": "Loads",
                "customfield_27140": "Spins forever",
                "customfield_11947": { "value": "S2" },
                "customfield_14849": { "value": "Staging" }
            }
        });
        let issue = map_issue(&raw).expect("maps");
        let bug = issue.bug.expect("bug details present");

        assert_eq!(bug.steps_to_reproduce, "1. Open the page");
        assert_eq!(bug.severity, "S2");
        assert_eq!(bug.detected_in, "Staging");
        assert_eq!(bug.root_cause, UNKNOWN);
    }

    #[test]
    fn test_sprint_name_absent_when_field_not_a_list() {
        let fields = json!({ "customfield_13543": "not a list" });
        assert_eq!(extract_sprint_name(&fields), UNKNOWN);
    }

    #[test]
    fn test_dev_summary_parses_embedded_json() {
        let field = r#"{"devSummaryJson":"{\"cachedValue\":{\"summary\":{\"pullrequest\":{\"overall\":{\"count\":3,\"lastUpdated\":\"2024-01-10T12:00:00.000+0000\",\"state\":\"OPEN\",\"details\":{\"openCount\":1,\"mergedCount\":2,\"declinedCount\":0}}}}},\"isStale\":false}"}"#;
        let summary = parse_dev_summary(field);

        assert_eq!(summary.pr_count, 3);
        assert_eq!(summary.state, "OPEN");
        assert_eq!(summary.open_count, 1);
        assert_eq!(summary.merged_count, 2);
        assert_eq!(summary.last_updated, "2024-01-10T12:00:00.000+0000");
    }

    #[test]
    fn test_dev_summary_falls_back_to_regex_counts() {
        // Mangled JSON that still carries the counters in plain sight
        let field = r#"garbage "count": 4 and "state": "MERGED" with "openCount": 0, "mergedCount": 4"#;
        let summary = parse_dev_summary(field);

        assert_eq!(summary.pr_count, 4);
        assert_eq!(summary.state, "MERGED");
        assert_eq!(summary.merged_count, 4);
        assert_eq!(summary.last_updated, UNKNOWN);
    }

    #[test]
    fn test_status_buckets() {
        assert!(matches!(classify_status("Done"), StatusBucket::Done));
        assert!(matches!(classify_status("CLOSED"), StatusBucket::Done));
        assert!(matches!(classify_status("In Progress"), StatusBucket::InProgress));
        assert!(matches!(classify_status("Code Review"), StatusBucket::InReview));
        assert!(matches!(classify_status("In QA"), StatusBucket::InQa));
        assert!(matches!(classify_status("Backlog"), StatusBucket::ToDo));
    }

    #[test]
    fn test_project_filter_matches_key_and_name() {
        let project = json!({ "key": "INGN", "name": "Ingestion", "description": "pipeline work" });
        assert!(project_matches(&project, "ingn"));
        assert!(project_matches(&project, "gest"));
        assert!(project_matches(&project, "PIPELINE"));
        assert!(!project_matches(&project, "billing"));
    }

    #[test]
    fn test_issue_update_empty_detection() {
        assert!(IssueUpdate::default().is_empty());
        let update = IssueUpdate {
            comment: Some("ping".to_string()),
            ..IssueUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
