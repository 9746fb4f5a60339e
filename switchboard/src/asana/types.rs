//! Normalized Asana records

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workspace {
    pub gid: String,
    pub name: String,
}

/// A project row, also used for portfolio items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub gid: String,
    pub name: String,
    pub archived: bool,
    pub created: String,
    pub owner: String,
    pub current_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub gid: String,
    pub name: String,
    pub completed: bool,
    pub assignee: String,
    pub due_on: String,
    pub modified: String,
    pub num_subtasks: u64,
}

/// A full task; `custom_fields` maps field name to display value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub gid: String,
    pub name: String,
    pub notes: String,
    pub completed: bool,
    pub assignee: String,
    pub due_on: String,
    pub created: String,
    pub modified: String,
    pub projects: Vec<String>,
    pub tags: Vec<String>,
    pub custom_fields: BTreeMap<String, String>,
    pub permalink_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedTask {
    pub gid: String,
    pub name: String,
    pub permalink_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    pub gid: String,
    pub name: String,
    pub owner: String,
    pub created: String,
}

/// The authenticated identity, used by the health check probe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentUser {
    pub gid: String,
    pub name: String,
    pub email: String,
}
