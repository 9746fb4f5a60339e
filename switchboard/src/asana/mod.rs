//! Asana adapter
//!
//! Workspace, project, task and portfolio operations against the v1 API.
//! Every response wraps its payload in a `{"data": …}` envelope; a reply
//! without one is treated as malformed. Workspace-scoped calls fall back to
//! the configured default workspace.

pub mod types;

pub use types::{
    CreatedTask, CurrentUser, Portfolio, ProjectSummary, Task, TaskSummary, Workspace,
};

use serde_json::{json, Map, Value};

use crate::config::ServiceConfig;
use crate::error::{Result, SwitchboardError};
use crate::http::{ApiClient, AuthScheme};
use crate::json_path::{self, UNASSIGNED, UNKNOWN};

const TASK_LIST_FIELDS: &str = "name,completed,assignee.name,due_on,modified_at,num_subtasks";
const TASK_DETAIL_FIELDS: &str = "name,notes,completed,assignee.name,due_on,created_at,\
modified_at,projects.name,tags.name,custom_fields.name,custom_fields.display_value,permalink_url";
const PROJECT_FIELDS: &str = "name,archived,created_at,owner.name,current_status.title";

/// Parameters for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub project_gid: String,
    pub notes: Option<String>,
    pub assignee: Option<String>,
    pub due_on: Option<String>,
}

/// Field changes to apply to an existing task
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
    pub assignee: Option<String>,
    pub due_on: Option<String>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.notes.is_none()
            && self.completed.is_none()
            && self.assignee.is_none()
            && self.due_on.is_none()
    }
}

/// Client for the Asana API
pub struct AsanaClient {
    api: ApiClient,
    default_workspace: Option<String>,
}

impl AsanaClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            default_workspace: config.default_container.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.api.auth_scheme()
    }

    pub fn default_workspace(&self) -> Option<&str> {
        self.default_workspace.as_deref()
    }

    fn resolve_workspace(&self, workspace_gid: Option<&str>) -> Result<String> {
        workspace_gid
            .map(str::to_string)
            .or_else(|| self.default_workspace.clone())
            .ok_or_else(|| {
                SwitchboardError::Validation(
                    "no workspace gid given and no default workspace is configured".to_string(),
                )
            })
    }

    /// Minimal authenticated probe for the health check
    pub async fn probe(&self) -> Result<CurrentUser> {
        let raw = self.api.get_json("users/me", &[]).await?;
        let user = data(&raw)?;
        Ok(CurrentUser {
            gid: json_path::str_at(user, &["gid"], UNKNOWN),
            name: json_path::str_at(user, &["name"], UNKNOWN),
            email: json_path::str_at(user, &["email"], UNKNOWN),
        })
    }

    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let raw = self.api.get_json("workspaces", &[]).await?;
        Ok(data_rows(&raw)?
            .iter()
            .map(|row| Workspace {
                gid: json_path::str_at(row, &["gid"], UNKNOWN),
                name: json_path::str_at(row, &["name"], UNKNOWN),
            })
            .collect())
    }

    pub async fn list_projects(
        &self,
        workspace_gid: Option<&str>,
        archived: bool,
    ) -> Result<Vec<ProjectSummary>> {
        let workspace = self.resolve_workspace(workspace_gid)?;
        let query = [
            ("workspace", workspace),
            ("archived", archived.to_string()),
            ("opt_fields", PROJECT_FIELDS.to_string()),
        ];
        let raw = self.api.get_json("projects", &query).await?;
        Ok(data_rows(&raw)?.iter().map(map_project).collect())
    }

    pub async fn list_tasks(
        &self,
        project_gid: &str,
        completed_since: Option<&str>,
    ) -> Result<Vec<TaskSummary>> {
        let mut query = vec![
            ("project", project_gid.to_string()),
            ("opt_fields", TASK_LIST_FIELDS.to_string()),
        ];
        if let Some(since) = completed_since {
            query.push(("completed_since", since.to_string()));
        }
        let raw = self.api.get_json("tasks", &query).await?;
        Ok(data_rows(&raw)?.iter().map(map_task_summary).collect())
    }

    pub async fn get_task(&self, task_gid: &str) -> Result<Task> {
        let path = format!("tasks/{task_gid}");
        let raw = self
            .api
            .get_json(&path, &[("opt_fields", TASK_DETAIL_FIELDS.to_string())])
            .await?;
        map_task(data(&raw)?)
    }

    pub async fn create_task(&self, request: &NewTask) -> Result<CreatedTask> {
        let mut fields = Map::new();
        fields.insert("name".into(), json!(request.name));
        fields.insert("projects".into(), json!([request.project_gid]));
        if let Some(notes) = &request.notes {
            fields.insert("notes".into(), json!(notes));
        }
        if let Some(assignee) = &request.assignee {
            fields.insert("assignee".into(), json!(assignee));
        }
        if let Some(due_on) = &request.due_on {
            fields.insert("due_on".into(), json!(due_on));
        }

        let raw = self.api.post_json("tasks", &json!({ "data": fields })).await?;
        let task = data(&raw)?;
        let gid = json_path::opt_str_at(task, &["gid"]).ok_or_else(|| {
            SwitchboardError::MalformedResponse("create task response missing 'gid'".to_string())
        })?;
        Ok(CreatedTask {
            gid,
            name: json_path::str_at(task, &["name"], ""),
            permalink_url: json_path::str_at(task, &["permalink_url"], ""),
        })
    }

    /// Apply field edits and return the updated task
    pub async fn update_task(&self, task_gid: &str, update: &TaskUpdate) -> Result<Task> {
        if update.is_empty() {
            return Err(SwitchboardError::Validation(
                "update requires at least one field".to_string(),
            ));
        }

        let mut fields = Map::new();
        if let Some(name) = &update.name {
            fields.insert("name".into(), json!(name));
        }
        if let Some(notes) = &update.notes {
            fields.insert("notes".into(), json!(notes));
        }
        if let Some(completed) = update.completed {
            fields.insert("completed".into(), json!(completed));
        }
        if let Some(assignee) = &update.assignee {
            fields.insert("assignee".into(), json!(assignee));
        }
        if let Some(due_on) = &update.due_on {
            fields.insert("due_on".into(), json!(due_on));
        }

        let path = format!("tasks/{task_gid}");
        let raw = self.api.put_json(&path, &json!({ "data": fields })).await?;
        map_task(data(&raw)?)
    }

    pub async fn search_tasks(
        &self,
        query: &str,
        workspace_gid: Option<&str>,
        limit: u32,
    ) -> Result<Vec<TaskSummary>> {
        let workspace = self.resolve_workspace(workspace_gid)?;
        let path = format!("workspaces/{workspace}/tasks/search");
        let params = [
            ("text", query.to_string()),
            ("limit", limit.to_string()),
            ("opt_fields", TASK_LIST_FIELDS.to_string()),
        ];
        let raw = self.api.get_json(&path, &params).await?;
        Ok(data_rows(&raw)?.iter().map(map_task_summary).collect())
    }

    pub async fn list_portfolios(
        &self,
        workspace_gid: Option<&str>,
        owner: Option<&str>,
    ) -> Result<Vec<Portfolio>> {
        let workspace = self.resolve_workspace(workspace_gid)?;
        let query = [
            ("workspace", workspace),
            ("owner", owner.unwrap_or("me").to_string()),
            ("opt_fields", "name,owner.name,created_at".to_string()),
        ];
        let raw = self.api.get_json("portfolios", &query).await?;
        Ok(data_rows(&raw)?
            .iter()
            .map(|row| Portfolio {
                gid: json_path::str_at(row, &["gid"], UNKNOWN),
                name: json_path::str_at(row, &["name"], UNKNOWN),
                owner: json_path::str_at(row, &["owner", "name"], UNASSIGNED),
                created: json_path::str_at(row, &["created_at"], UNKNOWN),
            })
            .collect())
    }

    /// Projects contained in a portfolio
    pub async fn portfolio_items(&self, portfolio_gid: &str) -> Result<Vec<ProjectSummary>> {
        let path = format!("portfolios/{portfolio_gid}/items");
        let raw = self
            .api
            .get_json(&path, &[("opt_fields", PROJECT_FIELDS.to_string())])
            .await?;
        Ok(data_rows(&raw)?.iter().map(map_project).collect())
    }
}

/// Unwrap the `{"data": …}` envelope
fn data(raw: &Value) -> Result<&Value> {
    json_path::lookup(raw, &["data"]).ok_or_else(|| {
        SwitchboardError::MalformedResponse("response missing 'data' envelope".to_string())
    })
}

fn data_rows(raw: &Value) -> Result<&[Value]> {
    data(raw)?.as_array().map(Vec::as_slice).ok_or_else(|| {
        SwitchboardError::MalformedResponse("'data' envelope is not a list".to_string())
    })
}

fn map_project(row: &Value) -> ProjectSummary {
    ProjectSummary {
        gid: json_path::str_at(row, &["gid"], UNKNOWN),
        name: json_path::str_at(row, &["name"], UNKNOWN),
        archived: json_path::bool_at(row, &["archived"], false),
        created: json_path::str_at(row, &["created_at"], UNKNOWN),
        owner: json_path::str_at(row, &["owner", "name"], UNASSIGNED),
        current_status: json_path::str_at(row, &["current_status", "title"], UNKNOWN),
    }
}

fn map_task_summary(row: &Value) -> TaskSummary {
    TaskSummary {
        gid: json_path::str_at(row, &["gid"], UNKNOWN),
        name: json_path::str_at(row, &["name"], ""),
        completed: json_path::bool_at(row, &["completed"], false),
        assignee: json_path::str_at(row, &["assignee", "name"], UNASSIGNED),
        due_on: json_path::str_at(row, &["due_on"], UNKNOWN),
        modified: json_path::str_at(row, &["modified_at"], UNKNOWN),
        num_subtasks: json_path::u64_at(row, &["num_subtasks"], 0),
    }
}

/// Map one full task document. Fails only when `gid` is missing.
fn map_task(raw: &Value) -> Result<Task> {
    let gid = json_path::opt_str_at(raw, &["gid"]).ok_or_else(|| {
        SwitchboardError::MalformedResponse("task response missing 'gid'".to_string())
    })?;

    let named_list = |path: &[&str]| -> Vec<String> {
        json_path::list_at(raw, path)
            .iter()
            .filter_map(|entry| json_path::opt_str_at(entry, &["name"]))
            .collect()
    };

    let custom_fields = json_path::list_at(raw, &["custom_fields"])
        .iter()
        .filter_map(|field| {
            let name = json_path::opt_str_at(field, &["name"])?;
            let value = json_path::str_at(field, &["display_value"], UNKNOWN);
            Some((name, value))
        })
        .collect();

    Ok(Task {
        gid,
        name: json_path::str_at(raw, &["name"], ""),
        notes: json_path::str_at(raw, &["notes"], ""),
        completed: json_path::bool_at(raw, &["completed"], false),
        assignee: json_path::str_at(raw, &["assignee", "name"], UNASSIGNED),
        due_on: json_path::str_at(raw, &["due_on"], UNKNOWN),
        created: json_path::str_at(raw, &["created_at"], UNKNOWN),
        modified: json_path::str_at(raw, &["modified_at"], UNKNOWN),
        projects: named_list(&["projects"]),
        tags: named_list(&["tags"]),
        custom_fields,
        permalink_url: json_path::str_at(raw, &["permalink_url"], ""),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope_required() {
        assert!(data(&json!({ "data": { "gid": "1" } })).is_ok());

        let err = data(&json!({ "gid": "1" })).unwrap_err();
        assert!(matches!(err, SwitchboardError::MalformedResponse(_)));

        let err = data_rows(&json!({ "data": { "gid": "1" } })).unwrap_err();
        assert!(matches!(err, SwitchboardError::MalformedResponse(_)));
    }

    #[test]
    fn test_map_task_full() {
        let raw = json!({
            "gid": "120001",
            "name": "Wire up ingestion alerts",
            "notes": "Page the on-call when lag exceeds 5m",
            "completed": false,
            "assignee": { "name": "Dana Q" },
            "due_on": "2024-03-01",
            "created_at": "2024-02-01T08:00:00.000Z",
            "modified_at": "2024-02-02T09:00:00.000Z",
            "projects": [ { "name": "Ingestion" } ],
            "tags": [ { "name": "oncall" } ],
            "custom_fields": [
                { "name": "Priority", "display_value": "P1" },
                { "name": "Quarter", "display_value": null }
            ],
            "permalink_url": "https://app.asana.com/0/1/120001"
        });
        let task = map_task(&raw).expect("maps");

        assert_eq!(task.gid, "120001");
        assert_eq!(task.assignee, "Dana Q");
        assert_eq!(task.projects, vec!["Ingestion".to_string()]);
        assert_eq!(task.custom_fields["Priority"], "P1");
        assert_eq!(task.custom_fields["Quarter"], UNKNOWN);
    }

    #[test]
    fn test_map_task_sentinels() {
        let task = map_task(&json!({ "gid": "9" })).expect("maps");

        assert_eq!(task.name, "");
        assert_eq!(task.assignee, UNASSIGNED);
        assert_eq!(task.due_on, UNKNOWN);
        assert!(!task.completed);
        assert!(task.projects.is_empty());
        assert!(task.custom_fields.is_empty());
    }

    #[test]
    fn test_map_task_missing_gid_is_malformed() {
        let err = map_task(&json!({ "name": "no gid" })).unwrap_err();
        assert!(matches!(err, SwitchboardError::MalformedResponse(_)));
    }

    #[test]
    fn test_task_update_empty_detection() {
        assert!(TaskUpdate::default().is_empty());
        let update = TaskUpdate {
            completed: Some(true),
            ..TaskUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_map_task_summary_row() {
        let row = json!({
            "gid": "7",
            "name": "Fix flaky test",
            "completed": true,
            "num_subtasks": 2
        });
        let summary = map_task_summary(&row);
        assert_eq!(summary.gid, "7");
        assert!(summary.completed);
        assert_eq!(summary.num_subtasks, 2);
        assert_eq!(summary.assignee, UNASSIGNED);
    }
}
