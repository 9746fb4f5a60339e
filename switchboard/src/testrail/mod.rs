//! TestRail adapter
//!
//! Case, section, run and result operations against the v2 API. TestRail
//! routes everything through `index.php?/api/v2/{method}` with extra
//! parameters appended as `&key=value`, uses basic auth exclusively, and has
//! no PUT or DELETE verbs; mutations are POSTs. List endpoints paginate with
//! offset/limit pages of 250.

pub mod types;

pub use types::{
    Case, CaseStep, CaseSummary, CurrentUser, Project, Run, Section, TestResult,
};

use serde_json::{json, Map, Value};

use crate::config::ServiceConfig;
use crate::error::{Result, SwitchboardError};
use crate::http::{ApiClient, AuthScheme};
use crate::json_path::{self, UNKNOWN};

const PAGE_LIMIT: u32 = 250;

/// Result status ids accepted by the API, in wire order
const STATUS_NAMES: [&str; 5] = ["passed", "blocked", "untested", "retest", "failed"];

/// Parameters for creating a case under a section
#[derive(Debug, Clone, Default)]
pub struct NewCase {
    pub title: String,
    pub template_id: Option<u64>,
    pub type_id: Option<u64>,
    pub priority_id: Option<u64>,
    pub refs: Option<String>,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected: Option<String>,
    pub steps_separated: Vec<CaseStep>,
}

/// Field changes to apply to an existing case
#[derive(Debug, Clone, Default)]
pub struct CaseUpdate {
    pub title: Option<String>,
    pub template_id: Option<u64>,
    pub type_id: Option<u64>,
    pub priority_id: Option<u64>,
    pub refs: Option<String>,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected: Option<String>,
    pub steps_separated: Option<Vec<CaseStep>>,
}

impl CaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.template_id.is_none()
            && self.type_id.is_none()
            && self.priority_id.is_none()
            && self.refs.is_none()
            && self.description.is_none()
            && self.steps.is_none()
            && self.expected.is_none()
            && self.steps_separated.is_none()
    }
}

/// Parameters for creating a run
#[derive(Debug, Clone, Default)]
pub struct NewRun {
    pub suite_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub include_all: bool,
    pub case_ids: Vec<u64>,
    pub milestone_id: Option<u64>,
    pub assignedto_id: Option<u64>,
}

/// A result to record against a test
#[derive(Debug, Clone, Default)]
pub struct NewResult {
    pub status_id: u64,
    pub comment: Option<String>,
    pub version: Option<String>,
    pub elapsed: Option<String>,
    pub defects: Option<String>,
    pub assignedto_id: Option<u64>,
}

/// A result to record against a case within a run, for bulk submission
#[derive(Debug, Clone, Default)]
pub struct CaseResult {
    pub case_id: u64,
    pub status_id: u64,
    pub comment: Option<String>,
    pub version: Option<String>,
    pub elapsed: Option<String>,
    pub defects: Option<String>,
}

/// Client for one TestRail deployment
#[derive(Debug)]
pub struct TestRailClient {
    api: ApiClient,
}

impl TestRailClient {
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
    pub async fn probe(&self) -> Result<CurrentUser> {
        let raw = self.api.get_json(&api_path("get_current_user"), &[]).await?;
        Ok(CurrentUser {
            id: json_path::u64_at(&raw, &["id"], 0),
            name: json_path::str_at(&raw, &["name"], UNKNOWN),
            email: json_path::str_at(&raw, &["email"], UNKNOWN),
            is_active: json_path::bool_at(&raw, &["is_active"], false),
        })
    }

    /// All projects, client-side filtered by name; also returns the count
    /// fetched before filtering
    pub async fn list_projects(
        &self,
        search_term: Option<&str>,
    ) -> Result<(Vec<Project>, u64)> {
        let rows = self.collect_paged("get_projects", &[], "projects").await?;
        let fetched = rows.len() as u64;

        let projects = rows
            .iter()
            .filter(|row| match search_term {
                Some(needle) => json_path::str_at(row, &["name"], "")
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                None => true,
            })
            .map(map_project)
            .collect();
        Ok((projects, fetched))
    }

    pub async fn get_project(&self, project_id: u64) -> Result<Project> {
        let raw = self
            .api
            .get_json(&api_path(&format!("get_project/{project_id}")), &[])
            .await?;
        require_id(&raw, "project")?;
        Ok(map_project(&raw))
    }

    /// All cases of a project, optionally narrowed by suite/section and a
    /// client-side title/description filter
    pub async fn list_cases(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
        section_id: Option<u64>,
        search_term: Option<&str>,
    ) -> Result<(Vec<CaseSummary>, u64)> {
        let mut extra: Vec<(&str, String)> = Vec::new();
        if let Some(suite) = suite_id {
            extra.push(("suite_id", suite.to_string()));
        }
        if let Some(section) = section_id {
            extra.push(("section_id", section.to_string()));
        }

        let rows = self
            .collect_paged(&format!("get_cases/{project_id}"), &extra, "cases")
            .await?;
        let fetched = rows.len() as u64;

        let cases = rows
            .iter()
            .filter(|row| match search_term {
                Some(needle) => case_matches(row, needle),
                None => true,
            })
            .map(map_case_summary)
            .collect();
        Ok((cases, fetched))
    }

    pub async fn get_case(&self, case_id: u64) -> Result<Case> {
        let raw = self
            .api
            .get_json(&api_path(&format!("get_case/{case_id}")), &[])
            .await?;
        map_case(&raw)
    }

    pub async fn add_case(&self, section_id: u64, case: &NewCase) -> Result<Case> {
        let payload = build_case_payload(case);
        let raw = self
            .api
            .post_json(&api_path(&format!("add_case/{section_id}")), &payload)
            .await?;
        map_case(&raw)
    }

    pub async fn update_case(&self, case_id: u64, update: &CaseUpdate) -> Result<Case> {
        if update.is_empty() {
            return Err(SwitchboardError::Validation(
                "update requires at least one field".to_string(),
            ));
        }
        let payload = build_case_update_payload(update);
        let raw = self
            .api
            .post_json(&api_path(&format!("update_case/{case_id}")), &payload)
            .await?;
        map_case(&raw)
    }

    pub async fn list_sections(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
    ) -> Result<Vec<Section>> {
        let mut extra: Vec<(&str, String)> = Vec::new();
        if let Some(suite) = suite_id {
            extra.push(("suite_id", suite.to_string()));
        }
        let rows = self
            .collect_paged(&format!("get_sections/{project_id}"), &extra, "sections")
            .await?;
        Ok(rows.iter().map(map_section).collect())
    }

    /// Runs of a project. `status` narrows to active (`is_completed=0`) or
    /// completed (`is_completed=1`); anything else lists all runs.
    pub async fn list_runs(
        &self,
        project_id: u64,
        status: &str,
        created_by: Option<u64>,
    ) -> Result<Vec<Run>> {
        let mut extra: Vec<(&str, String)> = Vec::new();
        match status.to_lowercase().as_str() {
            "active" => extra.push(("is_completed", "0".to_string())),
            "completed" => extra.push(("is_completed", "1".to_string())),
            _ => {}
        }
        if let Some(creator) = created_by {
            extra.push(("created_by", creator.to_string()));
        }
        let rows = self
            .collect_paged(&format!("get_runs/{project_id}"), &extra, "runs")
            .await?;
        Ok(rows.iter().map(map_run).collect())
    }

    pub async fn add_run(&self, project_id: u64, run: &NewRun) -> Result<Run> {
        let mut payload = Map::new();
        payload.insert("suite_id".into(), json!(run.suite_id));
        payload.insert("name".into(), json!(run.name));
        payload.insert("include_all".into(), json!(run.include_all));
        if let Some(description) = &run.description {
            payload.insert("description".into(), json!(description));
        }
        if !run.include_all {
            payload.insert("case_ids".into(), json!(run.case_ids));
        }
        if let Some(milestone) = run.milestone_id {
            payload.insert("milestone_id".into(), json!(milestone));
        }
        if let Some(assignee) = run.assignedto_id {
            payload.insert("assignedto_id".into(), json!(assignee));
        }

        let raw = self
            .api
            .post_json(&api_path(&format!("add_run/{project_id}")), &Value::Object(payload))
            .await?;
        require_id(&raw, "run")?;
        Ok(map_run(&raw))
    }

    pub async fn close_run(&self, run_id: u64) -> Result<Run> {
        let raw = self
            .api
            .post_json(&api_path(&format!("close_run/{run_id}")), &json!({}))
            .await?;
        require_id(&raw, "run")?;
        Ok(map_run(&raw))
    }

    pub async fn add_result(&self, test_id: u64, result: &NewResult) -> Result<TestResult> {
        validate_status(result.status_id)?;

        let mut payload = Map::new();
        payload.insert("status_id".into(), json!(result.status_id));
        if let Some(comment) = &result.comment {
            payload.insert("comment".into(), json!(comment));
        }
        if let Some(version) = &result.version {
            payload.insert("version".into(), json!(version));
        }
        if let Some(elapsed) = &result.elapsed {
            payload.insert("elapsed".into(), json!(elapsed));
        }
        if let Some(defects) = &result.defects {
            payload.insert("defects".into(), json!(defects));
        }
        if let Some(assignee) = result.assignedto_id {
            payload.insert("assignedto_id".into(), json!(assignee));
        }

        let raw = self
            .api
            .post_json(
                &api_path(&format!("add_result/{test_id}")),
                &Value::Object(payload),
            )
            .await?;
        require_id(&raw, "result")?;
        Ok(map_result(&raw))
    }

    /// Record results for several cases of a run in one call
    pub async fn add_results_for_cases(
        &self,
        run_id: u64,
        results: &[CaseResult],
    ) -> Result<Vec<TestResult>> {
        if results.is_empty() {
            return Err(SwitchboardError::Validation(
                "at least one result is required".to_string(),
            ));
        }
        for result in results {
            validate_status(result.status_id)?;
        }

        let entries: Vec<Value> = results
            .iter()
            .map(|result| {
                let mut entry = Map::new();
                entry.insert("case_id".into(), json!(result.case_id));
                entry.insert("status_id".into(), json!(result.status_id));
                if let Some(comment) = &result.comment {
                    entry.insert("comment".into(), json!(comment));
                }
                if let Some(version) = &result.version {
                    entry.insert("version".into(), json!(version));
                }
                if let Some(elapsed) = &result.elapsed {
                    entry.insert("elapsed".into(), json!(elapsed));
                }
                if let Some(defects) = &result.defects {
                    entry.insert("defects".into(), json!(defects));
                }
                Value::Object(entry)
            })
            .collect();

        let raw = self
            .api
            .post_json(
                &api_path(&format!("add_results_for_cases/{run_id}")),
                &json!({ "results": entries }),
            )
            .await?;

        let rows = match &raw {
            Value::Array(items) => items.as_slice(),
            _ => json_path::list_at(&raw, &["results"]),
        };
        Ok(rows.iter().map(map_result).collect())
    }

    /// Page through a list endpoint. Newer servers wrap rows in an object
    /// with `_links.next`; older ones return a bare array.
    async fn collect_paged(
        &self,
        method: &str,
        extra: &[(&str, String)],
        field: &str,
    ) -> Result<Vec<Value>> {
        let mut rows = Vec::new();
        let mut offset = 0u32;

        loop {
            let mut query: Vec<(&str, String)> = extra.to_vec();
            query.push(("offset", offset.to_string()));
            query.push(("limit", PAGE_LIMIT.to_string()));
            let raw = self.api.get_json(&api_path(method), &query).await?;

            let (page, has_more) = match &raw {
                Value::Array(items) => (items.clone(), items.len() as u32 == PAGE_LIMIT),
                _ => {
                    let items = json_path::list_at(&raw, &[field]).to_vec();
                    let next = json_path::lookup(&raw, &["_links", "next"]).is_some();
                    (items, next)
                }
            };

            let exhausted = page.is_empty();
            rows.extend(page);
            if !has_more || exhausted {
                break;
            }
            offset += PAGE_LIMIT;
        }

        Ok(rows)
    }
}

fn api_path(method: &str) -> String {
    format!("index.php?/api/v2/{method}")
}

fn validate_status(status_id: u64) -> Result<()> {
    if (1..=STATUS_NAMES.len() as u64).contains(&status_id) {
        Ok(())
    } else {
        Err(SwitchboardError::Validation(format!(
            "status_id {status_id} is outside 1-5 ({})",
            STATUS_NAMES.join(", ")
        )))
    }
}

fn require_id(raw: &Value, what: &str) -> Result<u64> {
    json_path::lookup(raw, &["id"])
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            SwitchboardError::MalformedResponse(format!(
                "{what} response missing numeric 'id'"
            ))
        })
}

fn case_matches(case: &Value, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    json_path::str_at(case, &["title"], "")
        .to_lowercase()
        .contains(&needle)
        || json_path::str_at(case, &["custom_description"], "")
            .to_lowercase()
            .contains(&needle)
}

fn map_project(raw: &Value) -> Project {
    Project {
        id: json_path::u64_at(raw, &["id"], 0),
        name: json_path::str_at(raw, &["name"], UNKNOWN),
        announcement: json_path::str_at(raw, &["announcement"], ""),
        is_completed: json_path::bool_at(raw, &["is_completed"], false),
        url: json_path::str_at(raw, &["url"], ""),
    }
}

fn map_case_summary(raw: &Value) -> CaseSummary {
    CaseSummary {
        id: json_path::u64_at(raw, &["id"], 0),
        title: json_path::str_at(raw, &["title"], ""),
        section_id: json_path::u64_at(raw, &["section_id"], 0),
        priority_id: json_path::u64_at(raw, &["priority_id"], 0),
        type_id: json_path::u64_at(raw, &["type_id"], 0),
        refs: json_path::str_at(raw, &["refs"], ""),
        description: json_path::str_at(raw, &["custom_description"], ""),
    }
}

/// Map one full case document. Fails only when the numeric `id` is missing.
fn map_case(raw: &Value) -> Result<Case> {
    let id = require_id(raw, "case")?;

    let steps_separated = json_path::list_at(raw, &["custom_steps_separated"])
        .iter()
        .map(|step| CaseStep {
            content: json_path::str_at(step, &["content"], ""),
            expected: json_path::str_at(step, &["expected"], ""),
        })
        .collect();

    Ok(Case {
        id,
        title: json_path::str_at(raw, &["title"], ""),
        section_id: json_path::u64_at(raw, &["section_id"], 0),
        priority_id: json_path::u64_at(raw, &["priority_id"], 0),
        type_id: json_path::u64_at(raw, &["type_id"], 0),
        refs: json_path::str_at(raw, &["refs"], ""),
        description: json_path::str_at(raw, &["custom_description"], ""),
        steps: json_path::str_at(raw, &["custom_steps"], ""),
        expected: json_path::str_at(raw, &["custom_expected"], ""),
        steps_separated,
    })
}

fn map_section(raw: &Value) -> Section {
    Section {
        id: json_path::u64_at(raw, &["id"], 0),
        name: json_path::str_at(raw, &["name"], UNKNOWN),
        parent_id: json_path::u64_at(raw, &["parent_id"], 0),
        depth: json_path::u64_at(raw, &["depth"], 0),
        suite_id: json_path::u64_at(raw, &["suite_id"], 0),
    }
}

fn map_run(raw: &Value) -> Run {
    Run {
        id: json_path::u64_at(raw, &["id"], 0),
        name: json_path::str_at(raw, &["name"], UNKNOWN),
        is_completed: json_path::bool_at(raw, &["is_completed"], false),
        passed_count: json_path::u64_at(raw, &["passed_count"], 0),
        failed_count: json_path::u64_at(raw, &["failed_count"], 0),
        blocked_count: json_path::u64_at(raw, &["blocked_count"], 0),
        untested_count: json_path::u64_at(raw, &["untested_count"], 0),
        url: json_path::str_at(raw, &["url"], ""),
    }
}

fn map_result(raw: &Value) -> TestResult {
    TestResult {
        id: json_path::u64_at(raw, &["id"], 0),
        test_id: json_path::u64_at(raw, &["test_id"], 0),
        status_id: json_path::u64_at(raw, &["status_id"], 0),
        comment: json_path::str_at(raw, &["comment"], ""),
    }
}

fn build_case_payload(case: &NewCase) -> Value {
    let mut payload = Map::new();
    payload.insert("title".into(), json!(case.title));
    if let Some(template) = case.template_id {
        payload.insert("template_id".into(), json!(template));
    }
    if let Some(type_id) = case.type_id {
        payload.insert("type_id".into(), json!(type_id));
    }
    if let Some(priority) = case.priority_id {
        payload.insert("priority_id".into(), json!(priority));
    }
    if let Some(refs) = &case.refs {
        payload.insert("refs".into(), json!(refs));
    }
    if let Some(description) = &case.description {
        payload.insert("custom_description".into(), json!(description));
    }
    if let Some(steps) = &case.steps {
        payload.insert("custom_steps".into(), json!(steps));
    }
    if let Some(expected) = &case.expected {
        payload.insert("custom_expected".into(), json!(expected));
    }
    if !case.steps_separated.is_empty() {
        payload.insert(
            "custom_steps_separated".into(),
            steps_to_value(&case.steps_separated),
        );
    }
    Value::Object(payload)
}

fn build_case_update_payload(update: &CaseUpdate) -> Value {
    let mut payload = Map::new();
    if let Some(title) = &update.title {
        payload.insert("title".into(), json!(title));
    }
    if let Some(template) = update.template_id {
        payload.insert("template_id".into(), json!(template));
    }
    if let Some(type_id) = update.type_id {
        payload.insert("type_id".into(), json!(type_id));
    }
    if let Some(priority) = update.priority_id {
        payload.insert("priority_id".into(), json!(priority));
    }
    if let Some(refs) = &update.refs {
        payload.insert("refs".into(), json!(refs));
    }
    if let Some(description) = &update.description {
        payload.insert("custom_description".into(), json!(description));
    }
    if let Some(steps) = &update.steps {
        payload.insert("custom_steps".into(), json!(steps));
    }
    if let Some(expected) = &update.expected {
        payload.insert("custom_expected".into(), json!(expected));
    }
    if let Some(steps) = &update.steps_separated {
        payload.insert("custom_steps_separated".into(), steps_to_value(steps));
    }
    Value::Object(payload)
}

fn steps_to_value(steps: &[CaseStep]) -> Value {
    Value::Array(
        steps
            .iter()
            .map(|step| json!({ "content": step.content, "expected": step.expected }))
            .collect(),
    )
}
