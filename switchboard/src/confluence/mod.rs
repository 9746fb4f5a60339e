//! Confluence adapter
//!
//! CQL search, space listings and page reads/writes against `/rest/api`.
//! Page bodies cross the boundary as Markdown: storage-format HTML is
//! converted on the way out and Markdown is rendered to storage HTML on the
//! way in, both via [`crate::markdown`].

pub mod types;

pub use types::{CreatedPage, Page, PageSummary, Space};

use serde_json::{json, Value};

use crate::config::ServiceConfig;
use crate::error::{Result, SwitchboardError};
use crate::http::{ApiClient, AuthScheme};
use crate::json_path::{self, UNKNOWN};
use crate::markdown::{markdown_to_storage, MarkdownConverter};

/// Parameters for creating a page
#[derive(Debug, Clone)]
pub struct NewPage {
    pub space_key: String,
    pub title: String,
    pub body_markdown: String,
    pub parent_page_id: Option<String>,
    pub labels: Vec<String>,
}

/// Client for one Confluence deployment
pub struct ConfluenceClient {
    api: ApiClient,
    converter: MarkdownConverter,
}

impl ConfluenceClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            converter: MarkdownConverter::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.api.auth_scheme()
    }

    /// Minimal authenticated probe for the health check; returns the number
    /// of spaces visible in the first page
    pub async fn probe(&self) -> Result<u64> {
        let raw = self
            .api
            .get_json("rest/api/space", &[("limit", "1".to_string())])
            .await?;
        Ok(json_path::u64_at(&raw, &["size"], 0))
    }

    /// Full-text CQL search, optionally scoped to one space
    pub async fn search_pages(
        &self,
        query: &str,
        space_key: Option<&str>,
        limit: u32,
    ) -> Result<(Vec<PageSummary>, u64)> {
        let cql = build_cql(query, space_key);
        let params = [
            ("cql", cql),
            ("limit", limit.to_string()),
            ("expand", "version,space".to_string()),
        ];
        let raw = self.api.get_json("rest/api/content/search", &params).await?;

        let rows: Vec<PageSummary> = json_path::list_at(&raw, &["results"])
            .iter()
            .map(|row| map_page_summary(self.api.base_url(), row))
            .collect();
        let total = json_path::lookup(&raw, &["totalSize"])
            .and_then(Value::as_u64)
            .unwrap_or_else(|| json_path::u64_at(&raw, &["size"], rows.len() as u64));
        Ok((rows, total))
    }

    /// Visible spaces, following start/limit pagination up to `limit` rows
    pub async fn list_spaces(&self, limit: u32) -> Result<Vec<Space>> {
        let mut spaces: Vec<Space> = Vec::new();

        while (spaces.len() as u32) < limit {
            let remaining = limit - spaces.len() as u32;
            let params = [
                ("start", spaces.len().to_string()),
                ("limit", remaining.to_string()),
                ("expand", "description.plain".to_string()),
            ];
            let raw = self.api.get_json("rest/api/space", &params).await?;

            let page = json_path::list_at(&raw, &["results"]);
            if page.is_empty() {
                break;
            }
            let page_len = page.len() as u64;
            spaces.extend(page.iter().map(|space| Space {
                key: json_path::str_at(space, &["key"], UNKNOWN),
                name: json_path::str_at(space, &["name"], UNKNOWN),
                space_type: json_path::str_at(space, &["type"], UNKNOWN),
                description: json_path::str_at(space, &["description", "plain", "value"], ""),
            }));

            // A short page means the server ran out of spaces
            if page_len < u64::from(remaining) {
                break;
            }
        }

        Ok(spaces)
    }

    /// Fetch one page by title within a space and convert its body to
    /// Markdown
    pub async fn get_page(&self, title: &str, space_key: &str) -> Result<Page> {
        let params = [
            ("title", title.to_string()),
            ("spaceKey", space_key.to_string()),
            ("expand", "body.storage,version,space".to_string()),
        ];
        let raw = self.api.get_json("rest/api/content", &params).await?;

        let results = json_path::list_at(&raw, &["results"]);
        let Some(first) = results.first() else {
            return Err(SwitchboardError::MalformedResponse(format!(
                "no page titled '{title}' in space '{space_key}'"
            )));
        };
        self.map_page(first)
    }

    /// Create a page from Markdown; labels are attached afterwards and a
    /// label failure does not undo the creation
    pub async fn create_page(&self, request: &NewPage) -> Result<CreatedPage> {
        let payload = build_page_payload(request);
        let raw = self.api.post_json("rest/api/content", &payload).await?;

        let id = json_path::opt_str_at(&raw, &["id"]).ok_or_else(|| {
            SwitchboardError::MalformedResponse("create page response missing 'id'".to_string())
        })?;

        if !request.labels.is_empty() {
            let labels: Vec<Value> = request
                .labels
                .iter()
                .map(|label| json!({ "prefix": "global", "name": label }))
                .collect();
            let path = format!("rest/api/content/{id}/label");
            if let Err(error) = self.api.post_json(&path, &Value::Array(labels)).await {
                tracing::warn!("page {} created but labels failed: {}", id, error);
            }
        }

        Ok(CreatedPage {
            title: json_path::str_at(&raw, &["title"], &request.title),
            url: webui_url(self.api.base_url(), &raw),
            version: json_path::i64_at(&raw, &["version", "number"], 0),
            id,
        })
    }

    fn map_page(&self, raw: &Value) -> Result<Page> {
        let id = json_path::opt_str_at(raw, &["id"]).ok_or_else(|| {
            SwitchboardError::MalformedResponse("page response missing 'id'".to_string())
        })?;

        let html = json_path::str_at(raw, &["body", "storage", "value"], "");
        let body_markdown = if html.is_empty() {
            String::new()
        } else {
            self.converter.html_to_markdown(&html)?
        };

        Ok(Page {
            id,
            title: json_path::str_at(raw, &["title"], ""),
            space_key: json_path::str_at(raw, &["space", "key"], UNKNOWN),
            space_name: json_path::str_at(raw, &["space", "name"], UNKNOWN),
            version: json_path::i64_at(raw, &["version", "number"], 0),
            url: webui_url(self.api.base_url(), raw),
            updated: json_path::str_at(raw, &["version", "when"], UNKNOWN),
            author: json_path::str_at(raw, &["version", "by", "displayName"], UNKNOWN),
            body_markdown,
        })
    }
}

fn build_cql(query: &str, space_key: Option<&str>) -> String {
    match space_key {
        Some(key) => format!(r#"text ~ "{query}" and space = "{key}""#),
        None => format!(r#"text ~ "{query}""#),
    }
}

fn build_page_payload(request: &NewPage) -> Value {
    let mut payload = json!({
        "type": "page",
        "title": request.title,
        "space": { "key": request.space_key },
        "body": {
            "storage": {
                "value": markdown_to_storage(&request.body_markdown),
                "representation": "storage"
            }
        }
    });
    if let Some(parent) = &request.parent_page_id {
        payload["ancestors"] = json!([{ "id": parent }]);
    }
    payload
}

fn webui_url(base_url: &str, raw: &Value) -> String {
    let webui = json_path::str_at(raw, &["_links", "webui"], "");
    if webui.is_empty() {
        String::new()
    } else {
        format!("{base_url}{webui}")
    }
}

fn map_page_summary(base_url: &str, raw: &Value) -> PageSummary {
    PageSummary {
        id: json_path::str_at(raw, &["id"], UNKNOWN),
        title: json_path::str_at(raw, &["title"], ""),
        page_type: json_path::str_at(raw, &["type"], "page"),
        space_key: json_path::str_at(raw, &["space", "key"], UNKNOWN),
        space_name: json_path::str_at(raw, &["space", "name"], UNKNOWN),
        url: webui_url(base_url, raw),
        created: json_path::str_at(raw, &["version", "when"], UNKNOWN),
        creator: json_path::str_at(raw, &["version", "by", "displayName"], UNKNOWN),
        excerpt: json_path::str_at(raw, &["excerpt"], ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cql_with_and_without_space() {
        assert_eq!(build_cql("rollout plan", None), r#"text ~ "rollout plan""#);
        assert_eq!(
            build_cql("rollout plan", Some("OPS")),
            r#"text ~ "rollout plan" and space = "OPS""#
        );
    }

    #[test]
    fn test_map_page_summary_defaults() {
        let row = json!({ "id": "123", "title": "Runbook" });
        let summary = map_page_summary("https://wiki.example.com", &row);

        assert_eq!(summary.id, "123");
        assert_eq!(summary.space_key, UNKNOWN);
        assert_eq!(summary.creator, UNKNOWN);
        assert_eq!(summary.url, "");
        assert_eq!(summary.excerpt, "");
    }

    #[test]
    fn test_webui_url_joined_onto_base() {
        let row = json!({ "_links": { "webui": "/display/OPS/Runbook" } });
        assert_eq!(
            webui_url("https://wiki.example.com", &row),
            "https://wiki.example.com/display/OPS/Runbook"
        );
    }

    #[test]
    fn test_page_payload_includes_ancestors_only_when_parented() {
        let mut request = NewPage {
            space_key: "OPS".to_string(),
            title: "Runbook".to_string(),
            body_markdown: "# Heading".to_string(),
            parent_page_id: None,
            labels: vec![],
        };
        let payload = build_page_payload(&request);
        assert!(payload.get("ancestors").is_none());
        assert!(payload["body"]["storage"]["value"]
            .as_str()
            .expect("storage value")
            .contains("<h1>"));

        request.parent_page_id = Some("99".to_string());
        let payload = build_page_payload(&request);
        assert_eq!(payload["ancestors"][0]["id"], "99");
    }

    #[test]
    fn test_map_page_converts_body() {
        let config = crate::config::ServiceConfig::new(
            "https://wiki.example.com".to_string(),
            "token".into(),
        )
        .expect("config");
        let client = ConfluenceClient::new(&config).expect("client");

        let raw = json!({
            "id": "55",
            "title": "Runbook",
            "space": { "key": "OPS", "name": "Operations" },
            "version": { "number": 7, "when": "2024-02-01T08:00:00Z", "by": { "displayName": "Dana Q" } },
            "body": { "storage": { "value": "<p>Hello <strong>world</strong></p>" } },
            "_links": { "webui": "/display/OPS/Runbook" }
        });
        let page = client.map_page(&raw).expect("maps");

        assert_eq!(page.id, "55");
        assert_eq!(page.version, 7);
        assert!(page.body_markdown.contains("**world**"));
        assert_eq!(page.url, "https://wiki.example.com/display/OPS/Runbook");
    }

    #[test]
    fn test_map_page_missing_id_is_malformed() {
        let config = crate::config::ServiceConfig::new(
            "https://wiki.example.com".to_string(),
            "token".into(),
        )
        .expect("config");
        let client = ConfluenceClient::new(&config).expect("client");

        let err = client.map_page(&json!({ "title": "no id" })).unwrap_err();
        assert!(matches!(err, SwitchboardError::MalformedResponse(_)));
    }
}
