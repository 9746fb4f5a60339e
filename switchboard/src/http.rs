//! HTTP transport shared by every service client
//!
//! One `ApiClient` per configured service: a pooled `reqwest::Client`, the
//! authorization header chosen once at construction, and the configured
//! timeout applied to every call. Failures are classified into the error
//! taxonomy (timeout / connection / http status) so callers can branch on
//! the variant instead of matching message text. No retries here; a failed
//! call is reported exactly once.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::error::{Result, SwitchboardError};

/// Remote error bodies are truncated to this many characters before being
/// embedded in an error message
const ERROR_BODY_LIMIT: usize = 500;

/// Which authorization header shape the client sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: Basic <base64(user:secret)>`
    Basic,
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Bearer => f.write_str("bearer"),
            AuthScheme::Basic => f.write_str("basic"),
        }
    }
}

/// HTTP client bound to one service's base URL and credential
#[derive(Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    scheme: AuthScheme,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client from a service config.
    ///
    /// The authorization scheme is decided here, once: a credential
    /// containing `:` is split into user/secret for basic auth, anything
    /// else is sent as a bearer token. A bearer token that itself contains
    /// `:` is therefore treated as a pair; that ambiguity is inherited from
    /// the deployments this replaces and is kept for compatibility.
    ///
    /// # Errors
    ///
    /// `SwitchboardError::Configuration` when the underlying client cannot
    /// be constructed or the credential cannot form a valid header.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let raw = config.credential.reveal();
        let (scheme, header) = if let Some((user, secret)) = raw.split_once(':') {
            let encoded = BASE64_STANDARD.encode(format!("{user}:{secret}"));
            (AuthScheme::Basic, format!("Basic {encoded}"))
        } else {
            (AuthScheme::Bearer, format!("Bearer {raw}"))
        };

        let mut auth_value = HeaderValue::from_str(&header).map_err(|_| {
            SwitchboardError::Configuration(
                "credential contains characters that cannot appear in a header".to_string(),
            )
        })?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers);
        if !config.verify_tls {
            tracing::warn!(
                "TLS verification disabled for {} - only appropriate for legacy deployments",
                config.base_url
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            SwitchboardError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            scheme,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.scheme
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }

    /// GET returning parsed JSON
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let request = self.request(Method::GET, path).query(query);
        let response = self.send(request).await?;
        self.parse_json(response).await
    }

    /// GET returning the raw body text (diffs, file content)
    pub async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let request = self.request(Method::GET, path).query(query);
        let response = self.send(request).await?;
        response
            .text()
            .await
            .map_err(|e| SwitchboardError::MalformedResponse(format!("unreadable body: {e}")))
    }

    /// POST with a JSON body, returning parsed JSON (null for empty bodies)
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(request).await?;
        self.parse_json(response).await
    }

    /// PUT with a JSON body, returning parsed JSON (null for empty bodies,
    /// which several update endpoints answer with)
    pub async fn put_json(&self, path: &str, body: &Value) -> Result<Value> {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.send(request).await?;
        self.parse_json(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Join the base URL and a path. The path may already carry a query
    /// string (the TestRail wire format is `index.php?/api/v2/...`), in
    /// which case reqwest appends further parameters with `&`.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(self.status_error(status, &body))
    }

    async fn parse_json(&self, response: Response) -> Result<Value> {
        let body = response
            .text()
            .await
            .map_err(|e| SwitchboardError::MalformedResponse(format!("unreadable body: {e}")))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            SwitchboardError::MalformedResponse(format!("response body is not JSON: {e}"))
        })
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> SwitchboardError {
        if err.is_timeout() {
            SwitchboardError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            SwitchboardError::Connection(err.to_string())
        } else {
            SwitchboardError::Connection(format!("request failed: {err}"))
        }
    }

    fn status_error(&self, status: StatusCode, body: &str) -> SwitchboardError {
        SwitchboardError::Http {
            status: status.as_u16(),
            body: truncate(body, ERROR_BODY_LIMIT),
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}…")
    }
}
