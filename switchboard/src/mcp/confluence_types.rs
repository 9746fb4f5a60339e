//! Request types for Confluence MCP operations

use serde::{Deserialize, Serialize};

fn default_search_limit() -> u32 {
    25
}

fn default_space_limit() -> u32 {
    50
}

/// Request to check Confluence connectivity and credentials
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct HealthcheckRequest {
    // No parameters needed for the health check
}

/// Request to search pages by text
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SearchPagesRequest {
    /// Search text, matched against page content
    pub query: String,
    /// Restrict the search to one space
    pub space_key: Option<String>,
    /// Maximum number of pages to return
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

/// Request to list visible spaces
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListSpacesRequest {
    /// Maximum number of spaces to return
    #[serde(default = "default_space_limit")]
    pub limit: u32,
}

/// Request to fetch one page by title within a space
///
/// # Examples
///
/// ```ignore
/// GetPageRequest {
///     title: "Release Checklist".to_string(),
///     space_key: "ENG".to_string(),
/// }
/// ```
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetPageRequest {
    /// Exact page title
    pub title: String,
    /// Space the page lives in
    pub space_key: String,
}

/// Request to create a page from Markdown
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CreatePageRequest {
    /// Space to create the page in
    pub space_key: String,
    /// Page title
    pub title: String,
    /// Page body as Markdown; converted to storage format before upload
    pub body_markdown: String,
    /// Optional parent page id; the page is created as its child
    pub parent_page_id: Option<String>,
    /// Labels to attach after creation
    #[serde(default)]
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults_limit() {
        let request: SearchPagesRequest =
            serde_json::from_value(serde_json::json!({ "query": "deployment" }))
                .expect("deserializes");
        assert_eq!(request.limit, 25);
        assert!(request.space_key.is_none());
    }

    #[test]
    fn test_list_spaces_defaults_limit() {
        let request: ListSpacesRequest =
            serde_json::from_value(serde_json::json!({})).expect("deserializes");
        assert_eq!(request.limit, 50);
    }

    #[test]
    fn test_create_page_defaults_labels_empty() {
        let request: CreatePageRequest = serde_json::from_value(serde_json::json!({
            "space_key": "ENG",
            "title": "New Page",
            "body_markdown": "# Heading",
        }))
        .expect("deserializes");
        assert!(request.labels.is_empty());
        assert!(request.parent_page_id.is_none());
    }
}
