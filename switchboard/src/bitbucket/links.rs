//! Pull request link and ticket id parsing
//!
//! Bitbucket Server has grown two URL shapes for the same resource: the
//! canonical plural form (`.../pull-requests/42`) and a legacy singular form
//! (`.../pull-request/42`) still present in old comments and bookmarks.
//! Parsing tries an ordered table of shapes, canonical first, and the first
//! structural match wins. Anything after an `/overview` segment is
//! presentation chrome and is cut before matching.
//!
//! Pure string work, no network, same output for the same input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{Result, SwitchboardError};

/// Parsed coordinates of one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Project key, e.g. `INGN`
    pub project: String,
    /// Repository slug, e.g. `ingn_api`
    pub repo: String,
    /// Numeric pull request id
    pub id: u64,
}

impl PullRequestRef {
    /// REST path for this pull request under `/rest/api/1.0`
    pub fn api_path(&self) -> String {
        format!(
            "rest/api/1.0/projects/{}/repos/{}/pull-requests/{}",
            self.project, self.repo, self.id
        )
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.project, self.repo, self.id)
    }
}

/// One recognized URL shape: a name for diagnostics and the pattern that
/// captures (project, repo, id)
struct UrlShape {
    name: &'static str,
    pattern: Regex,
}

static URL_SHAPES: Lazy<Vec<UrlShape>> = Lazy::new(|| {
    vec![
        UrlShape {
            name: "canonical",
            pattern: Regex::new(r"/projects/([^/]+)/repos/([^/]+)/pull-requests/(\d+)")
                .expect("canonical PR pattern"),
        },
        UrlShape {
            name: "legacy",
            pattern: Regex::new(r"/projects/([^/]+)/repos/([^/]+)/pull-request/(\d+)")
                .expect("legacy PR pattern"),
        },
    ]
});

/// Ticket id patterns, tried in order; the bare form matches bracketed and
/// parenthesized occurrences too, so the later entries only matter for
/// exotic inputs
static TICKET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)([a-z]+-\d+)").expect("bare ticket pattern"),
        Regex::new(r"(?i)\[([a-z]+-\d+)\]").expect("bracketed ticket pattern"),
        Regex::new(r"(?i)\(([a-z]+-\d+)\)").expect("parenthesized ticket pattern"),
    ]
});

/// Parse a pull request URL into its coordinates.
///
/// # Errors
///
/// `SwitchboardError::Validation` carrying the original string when no
/// shape matches; never a partial result.
///
/// # Examples
///
/// ```
/// use switchboard::bitbucket::parse_pull_request_url;
///
/// let pr = parse_pull_request_url(
///     "https://git.example.com/projects/INGN/repos/ingn_api/pull-requests/866/overview",
/// )
/// .unwrap();
/// assert_eq!(pr.project, "INGN");
/// assert_eq!(pr.repo, "ingn_api");
/// assert_eq!(pr.id, 866);
/// ```
pub fn parse_pull_request_url(link: &str) -> Result<PullRequestRef> {
    let trimmed = link.trim();
    let clean = match trimmed.split_once("/overview") {
        Some((head, _)) => head,
        None => trimmed,
    };

    for shape in URL_SHAPES.iter() {
        if let Some(captures) = shape.pattern.captures(clean) {
            let id: u64 = captures[3]
                .parse()
                .map_err(|_| SwitchboardError::Validation(format!(
                    "pull request id in '{link}' is out of range"
                )))?;
            tracing::debug!("matched {} pull request link shape", shape.name);
            return Ok(PullRequestRef {
                project: captures[1].to_string(),
                repo: captures[2].to_string(),
                id,
            });
        }
    }

    Err(SwitchboardError::Validation(format!(
        "unrecognized pull request link: '{link}' (expected .../projects/KEY/repos/slug/pull-requests/ID)"
    )))
}

/// Extract the first ticket id (`ABC-123`) embedded in free text.
///
/// Case-insensitive; the match is normalized to uppercase. Returns `None`
/// when no id is present; absence is not an error. Does not check that the
/// project key exists anywhere.
pub fn extract_ticket_id(text: &str) -> Option<String> {
    for pattern in TICKET_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            return Some(captures[1].to_uppercase());
        }
    }
    None
}
