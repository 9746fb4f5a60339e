//! Process-wide adapter configuration
//!
//! Configuration is read from the environment exactly once at startup and
//! passed explicitly into each service client's constructor. Nothing in the
//! library reads environment variables after that point, which keeps the
//! configuration-error paths unit-testable without touching the real process
//! environment.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, SwitchboardError};

/// Default request timeout applied when a service does not override it
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL for the Asana public API
pub const ASANA_DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0";

/// A credential value that never renders its contents.
///
/// `Debug` and `Display` both print `***` so credentials cannot leak through
/// log lines, panics, or error envelopes. The raw value is only reachable
/// through [`Credential::reveal`], which exists for header construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw credential, for building the authorization header
    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// True when the credential holds a `user:secret` pair
    pub fn is_pair(&self) -> bool {
        self.0.contains(':')
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Connection settings for one remote service.
///
/// Immutable after construction; shared by every call the adapter makes for
/// the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the remote API, without a trailing slash
    pub base_url: String,
    /// Bearer token or `user:secret` pair
    pub credential: Credential,
    /// Whether to verify TLS certificates (off only for legacy deployments)
    pub verify_tls: bool,
    /// Per-request timeout
    pub timeout: Duration,
    /// Default project/workspace used when a tool call omits one
    pub default_container: Option<String>,
}

impl ServiceConfig {
    /// Create a config, validating the base URL shape.
    ///
    /// # Errors
    ///
    /// Returns `SwitchboardError::Configuration` when the URL does not parse
    /// or the credential is empty.
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/').to_string();

        url::Url::parse(&trimmed).map_err(|e| {
            SwitchboardError::Configuration(format!("invalid base URL '{trimmed}': {e}"))
        })?;

        if credential.is_empty() {
            return Err(SwitchboardError::Configuration(
                "credential must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: trimmed,
            credential,
            verify_tls: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_container: None,
        })
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_container(mut self, container: Option<String>) -> Self {
        self.default_container = container;
        self
    }
}

/// The five services an adapter can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    Jira,
    Bitbucket,
    Confluence,
    Asana,
    Testrail,
}

impl ServiceName {
    pub const ALL: [ServiceName; 5] = [
        ServiceName::Jira,
        ServiceName::Bitbucket,
        ServiceName::Confluence,
        ServiceName::Asana,
        ServiceName::Testrail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Jira => "jira",
            ServiceName::Bitbucket => "bitbucket",
            ServiceName::Confluence => "confluence",
            ServiceName::Asana => "asana",
            ServiceName::Testrail => "testrail",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = SwitchboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "jira" => Ok(ServiceName::Jira),
            "bitbucket" => Ok(ServiceName::Bitbucket),
            "confluence" => Ok(ServiceName::Confluence),
            "asana" => Ok(ServiceName::Asana),
            "testrail" => Ok(ServiceName::Testrail),
            other => Err(SwitchboardError::Validation(format!(
                "unknown service '{other}' (expected one of: jira, bitbucket, confluence, asana, testrail)"
            ))),
        }
    }
}

/// Configuration for every adapter this process can serve.
///
/// A service with missing required variables stays `None`; its tools still
/// register and report a configuration error when invoked, which is what the
/// health-check contract relies on.
#[derive(Debug, Clone, Default)]
pub struct SwitchboardConfig {
    pub jira: Option<ServiceConfig>,
    pub bitbucket: Option<ServiceConfig>,
    pub confluence: Option<ServiceConfig>,
    pub asana: Option<ServiceConfig>,
    pub testrail: Option<ServiceConfig>,
}

impl SwitchboardConfig {
    /// Read every service's configuration from the environment.
    ///
    /// Recognized variables, per service prefix (`JIRA`, `BITBUCKET`,
    /// `CONFLUENCE`, `ASANA`, `TESTRAIL`):
    ///
    /// - `<PREFIX>_BASE_URL` (required; Asana defaults to the public API,
    ///   TestRail uses `TESTRAIL_URL`)
    /// - `<PREFIX>_AUTH_TOKEN` (required; TestRail instead reads
    ///   `TESTRAIL_USERNAME` + `TESTRAIL_API_KEY`)
    /// - `<PREFIX>_DISABLE_TLS_VERIFY` (optional, `true`/`1`)
    /// - `<PREFIX>_TIMEOUT_SECS` (optional)
    /// - `JIRA_DEFAULT_PROJECT` / `ASANA_DEFAULT_WORKSPACE` (optional)
    ///
    /// A malformed value for an otherwise-present service is reported as a
    /// configuration error rather than silently skipping the service.
    pub fn from_env() -> Result<Self> {
        let jira = match env_var("JIRA_BASE_URL").zip(env_var("JIRA_AUTH_TOKEN")) {
            Some((base, token)) => Some(
                ServiceConfig::new(base, Credential::new(token))?
                    .with_verify_tls(!env_flag("JIRA_DISABLE_TLS_VERIFY"))
                    .with_timeout(env_timeout("JIRA_TIMEOUT_SECS")?)
                    .with_default_container(env_var("JIRA_DEFAULT_PROJECT")),
            ),
            None => None,
        };

        let bitbucket = match env_var("BITBUCKET_BASE_URL").zip(env_var("BITBUCKET_AUTH_TOKEN")) {
            Some((base, token)) => Some(
                ServiceConfig::new(base, Credential::new(token))?
                    .with_verify_tls(!env_flag("BITBUCKET_DISABLE_TLS_VERIFY"))
                    .with_timeout(env_timeout("BITBUCKET_TIMEOUT_SECS")?),
            ),
            None => None,
        };

        let confluence = match env_var("CONFLUENCE_BASE_URL").zip(env_var("CONFLUENCE_AUTH_TOKEN"))
        {
            Some((base, token)) => Some(
                ServiceConfig::new(base, Credential::new(token))?
                    .with_verify_tls(!env_flag("CONFLUENCE_DISABLE_TLS_VERIFY"))
                    .with_timeout(env_timeout("CONFLUENCE_TIMEOUT_SECS")?),
            ),
            None => None,
        };

        let asana = match env_var("ASANA_AUTH_TOKEN") {
            Some(token) => {
                let base =
                    env_var("ASANA_BASE_URL").unwrap_or_else(|| ASANA_DEFAULT_BASE_URL.to_string());
                Some(
                    ServiceConfig::new(base, Credential::new(token))?
                        .with_verify_tls(!env_flag("ASANA_DISABLE_TLS_VERIFY"))
                        .with_timeout(env_timeout("ASANA_TIMEOUT_SECS")?)
                        .with_default_container(env_var("ASANA_DEFAULT_WORKSPACE")),
                )
            }
            None => None,
        };

        let testrail = match env_var("TESTRAIL_URL") {
            Some(base) => {
                match env_var("TESTRAIL_USERNAME").zip(env_var("TESTRAIL_API_KEY")) {
                    Some((user, key)) => Some(
                        // TestRail authenticates with username + API key, which
                        // is exactly the `user:secret` shape the basic path expects.
                        ServiceConfig::new(base, Credential::new(format!("{user}:{key}")))?
                            .with_verify_tls(!env_flag("TESTRAIL_DISABLE_TLS_VERIFY"))
                            .with_timeout(env_timeout("TESTRAIL_TIMEOUT_SECS")?),
                    ),
                    None => None,
                }
            }
            None => None,
        };

        Ok(Self {
            jira,
            bitbucket,
            confluence,
            asana,
            testrail,
        })
    }

    /// The config slot for a service, if that service is configured
    pub fn service(&self, name: ServiceName) -> Option<&ServiceConfig> {
        match name {
            ServiceName::Jira => self.jira.as_ref(),
            ServiceName::Bitbucket => self.bitbucket.as_ref(),
            ServiceName::Confluence => self.confluence.as_ref(),
            ServiceName::Asana => self.asana.as_ref(),
            ServiceName::Testrail => self.testrail.as_ref(),
        }
    }

    /// Services with configuration present
    pub fn configured_services(&self) -> Vec<ServiceName> {
        ServiceName::ALL
            .into_iter()
            .filter(|name| self.service(*name).is_some())
            .collect()
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).unwrap_or_default().to_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn env_timeout(name: &str) -> Result<Duration> {
    match env_var(name) {
        Some(raw) => {
            let secs: u64 = raw.parse().map_err(|_| {
                SwitchboardError::Configuration(format!(
                    "environment variable '{name}' must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_service_env() {
        for var in [
            "JIRA_BASE_URL",
            "JIRA_AUTH_TOKEN",
            "JIRA_DEFAULT_PROJECT",
            "JIRA_DISABLE_TLS_VERIFY",
            "JIRA_TIMEOUT_SECS",
            "BITBUCKET_BASE_URL",
            "BITBUCKET_AUTH_TOKEN",
            "CONFLUENCE_BASE_URL",
            "CONFLUENCE_AUTH_TOKEN",
            "ASANA_BASE_URL",
            "ASANA_AUTH_TOKEN",
            "ASANA_DEFAULT_WORKSPACE",
            "ASANA_DISABLE_TLS_VERIFY",
            "TESTRAIL_URL",
            "TESTRAIL_USERNAME",
            "TESTRAIL_API_KEY",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_credential_never_renders_value() {
        let credential = Credential::new("super-secret-token");

        assert_eq!(format!("{credential}"), "***");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert!(!format!("{credential:?}").contains("super-secret"));
    }

    #[test]
    fn test_service_config_debug_redacts_credential() {
        let config = ServiceConfig::new("https://jira.example.com", Credential::new("secret"))
            .expect("valid config");

        let rendered = format!("{config:?}");
        assert!(rendered.contains("jira.example.com"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_service_config_trims_trailing_slash() {
        let config = ServiceConfig::new("https://wiki.example.com/", Credential::new("t"))
            .expect("valid config");
        assert_eq!(config.base_url, "https://wiki.example.com");
    }

    #[test]
    fn test_service_config_rejects_bad_url() {
        let result = ServiceConfig::new("not a url", Credential::new("t"));
        assert!(matches!(
            result,
            Err(SwitchboardError::Configuration(_))
        ));
    }

    #[test]
    fn test_service_config_rejects_empty_credential() {
        let result = ServiceConfig::new("https://jira.example.com", Credential::new(""));
        assert!(matches!(
            result,
            Err(SwitchboardError::Configuration(_))
        ));
    }

    #[test]
    fn test_credential_pair_detection() {
        assert!(Credential::new("user:secret").is_pair());
        assert!(!Credential::new("bearer-token").is_pair());
    }

    #[test]
    fn test_service_name_round_trip() {
        for name in ServiceName::ALL {
            let parsed: ServiceName = name.as_str().parse().expect("parse back");
            assert_eq!(parsed, name);
        }
        assert!("gitlab".parse::<ServiceName>().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_with_nothing_set() {
        clear_service_env();

        let config = SwitchboardConfig::from_env().expect("from_env");
        assert!(config.jira.is_none());
        assert!(config.bitbucket.is_none());
        assert!(config.confluence.is_none());
        assert!(config.asana.is_none());
        assert!(config.testrail.is_none());
        assert!(config.configured_services().is_empty());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_jira_settings() {
        clear_service_env();
        std::env::set_var("JIRA_BASE_URL", "https://jira.example.com/");
        std::env::set_var("JIRA_AUTH_TOKEN", "token-value");
        std::env::set_var("JIRA_DEFAULT_PROJECT", "OPS");
        std::env::set_var("JIRA_TIMEOUT_SECS", "10");

        let config = SwitchboardConfig::from_env().expect("from_env");
        let jira = config.jira.expect("jira configured");
        assert_eq!(jira.base_url, "https://jira.example.com");
        assert_eq!(jira.default_container.as_deref(), Some("OPS"));
        assert_eq!(jira.timeout, Duration::from_secs(10));
        assert!(jira.verify_tls);

        clear_service_env();
    }

    #[test]
    #[serial]
    fn test_from_env_joins_testrail_pair() {
        clear_service_env();
        std::env::set_var("TESTRAIL_URL", "https://testrail.example.com");
        std::env::set_var("TESTRAIL_USERNAME", "qa@example.com");
        std::env::set_var("TESTRAIL_API_KEY", "apikey");

        let config = SwitchboardConfig::from_env().expect("from_env");
        let testrail = config.testrail.expect("testrail configured");
        assert!(testrail.credential.is_pair());
        assert_eq!(testrail.credential.reveal(), "qa@example.com:apikey");

        clear_service_env();
    }

    #[test]
    #[serial]
    fn test_from_env_asana_defaults_base_url() {
        clear_service_env();
        std::env::set_var("ASANA_AUTH_TOKEN", "pat");
        std::env::set_var("ASANA_DISABLE_TLS_VERIFY", "true");

        let config = SwitchboardConfig::from_env().expect("from_env");
        let asana = config.asana.expect("asana configured");
        assert_eq!(asana.base_url, ASANA_DEFAULT_BASE_URL);
        assert!(!asana.verify_tls);

        clear_service_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_timeout() {
        clear_service_env();
        std::env::set_var("JIRA_BASE_URL", "https://jira.example.com");
        std::env::set_var("JIRA_AUTH_TOKEN", "token");
        std::env::set_var("JIRA_TIMEOUT_SECS", "soon");

        let result = SwitchboardConfig::from_env();
        assert!(matches!(
            result,
            Err(SwitchboardError::Configuration(_))
        ));

        clear_service_env();
    }
}
