//! Normalized Confluence records

use serde::Serialize;

/// One row of a CQL search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub page_type: String,
    pub space_key: String,
    pub space_name: String,
    pub url: String,
    pub created: String,
    pub creator: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Space {
    pub key: String,
    pub name: String,
    pub space_type: String,
    pub description: String,
}

/// A full page with its body already converted to Markdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub space_key: String,
    pub space_name: String,
    pub version: i64,
    pub url: String,
    pub updated: String,
    pub author: String,
    pub body_markdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedPage {
    pub id: String,
    pub title: String,
    pub url: String,
    pub version: i64,
}
