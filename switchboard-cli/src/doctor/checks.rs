//! Check implementations for the doctor module

use super::types::{Check, CheckStatus};
use switchboard::asana::AsanaClient;
use switchboard::bitbucket::BitbucketClient;
use switchboard::config::{ServiceConfig, ServiceName, SwitchboardConfig};
use switchboard::confluence::ConfluenceClient;
use switchboard::jira::JiraClient;
use switchboard::testrail::TestRailClient;
use switchboard::Result;

/// Check name constants to avoid typos between push sites and tests
pub mod check_names {
    pub const ENVIRONMENT: &str = "Environment configuration";
    pub const CONFIGURED_SERVICES: &str = "Configured services";
}

/// Environment variables required to enable each service.
///
/// The phrasing matches the configuration errors the MCP tools return, so
/// doctor output and tool envelopes point at the same variables.
pub fn required_variables(service: ServiceName) -> &'static str {
    match service {
        ServiceName::Jira => "JIRA_BASE_URL and JIRA_AUTH_TOKEN",
        ServiceName::Bitbucket => "BITBUCKET_BASE_URL and BITBUCKET_AUTH_TOKEN",
        ServiceName::Confluence => "CONFLUENCE_BASE_URL and CONFLUENCE_AUTH_TOKEN",
        ServiceName::Asana => "ASANA_AUTH_TOKEN",
        ServiceName::Testrail => "TESTRAIL_URL, TESTRAIL_USERNAME and TESTRAIL_API_KEY",
    }
}

/// Read the environment into a config, reporting parse failures as a check.
///
/// A malformed variable for one service fails the whole read, so this is an
/// error check rather than a per-service one.
pub fn check_environment(checks: &mut Vec<Check>) -> Option<SwitchboardConfig> {
    match SwitchboardConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            checks.push(Check {
                name: check_names::ENVIRONMENT.to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
                fix: Some("Correct the environment variable named in the message".to_string()),
            });
            None
        }
    }
}

/// Report which services have configuration present
pub fn check_configured_services(config: &SwitchboardConfig, checks: &mut Vec<Check>) {
    let configured = config.configured_services();

    if configured.is_empty() {
        checks.push(Check {
            name: check_names::CONFIGURED_SERVICES.to_string(),
            status: CheckStatus::Warning,
            message: "No services configured; every tool will answer with a configuration error"
                .to_string(),
            fix: Some(format!(
                "Export {} (or another service's variables) to enable an adapter",
                required_variables(ServiceName::Jira)
            )),
        });
        return;
    }

    let names: Vec<&str> = configured.iter().map(|s| s.as_str()).collect();
    checks.push(Check {
        name: check_names::CONFIGURED_SERVICES.to_string(),
        status: CheckStatus::Ok,
        message: format!("{} of 5: {}", configured.len(), names.join(", ")),
        fix: None,
    });
}

/// Report each service's settings: base URL, auth scheme, timeout, TLS
pub fn check_service_settings(config: &SwitchboardConfig, checks: &mut Vec<Check>) {
    for service in ServiceName::ALL {
        let name = format!("{service} configuration");

        let Some(settings) = config.service(service) else {
            checks.push(Check {
                name,
                status: CheckStatus::Ok,
                message: "not configured".to_string(),
                fix: None,
            });
            continue;
        };

        let scheme = if settings.credential.is_pair() {
            "basic"
        } else {
            "bearer"
        };
        checks.push(Check {
            name,
            status: CheckStatus::Ok,
            message: format!(
                "{} ({} auth, {}s timeout)",
                settings.base_url,
                scheme,
                settings.timeout.as_secs()
            ),
            fix: None,
        });

        if !settings.verify_tls {
            checks.push(Check {
                name: format!("{service} TLS verification"),
                status: CheckStatus::Warning,
                message: "TLS certificate verification is disabled".to_string(),
                fix: Some(format!(
                    "Unset {}_DISABLE_TLS_VERIFY once the deployment has a trusted certificate",
                    service.as_str().to_uppercase()
                )),
            });
        }
    }
}

/// Probe every configured service once and report the outcome.
///
/// Uses the same probe endpoints as the `<service>_healthcheck` tools, so a
/// passing doctor means the healthcheck tools will pass too.
pub async fn check_connectivity(config: &SwitchboardConfig, checks: &mut Vec<Check>) {
    for service in config.configured_services() {
        let Some(settings) = config.service(service) else {
            continue;
        };

        let check = match probe_service(service, settings).await {
            Ok(summary) => Check {
                name: format!("{service} connectivity"),
                status: CheckStatus::Ok,
                message: summary,
                fix: None,
            },
            Err(e) => Check {
                name: format!("{service} connectivity"),
                status: CheckStatus::Error,
                message: e.to_string(),
                fix: Some(connectivity_fix(service, &e)),
            },
        };
        checks.push(check);
    }
}

/// One authenticated probe against a service, summarized for the table
async fn probe_service(service: ServiceName, settings: &ServiceConfig) -> Result<String> {
    match service {
        ServiceName::Jira => {
            let user = JiraClient::new(settings)?.probe().await?;
            Ok(format!("authenticated as {}", user.display_name))
        }
        ServiceName::Bitbucket => {
            let properties = BitbucketClient::new(settings)?.probe().await?;
            Ok(format!(
                "{} v{}",
                properties.display_name, properties.version
            ))
        }
        ServiceName::Confluence => {
            let space_count = ConfluenceClient::new(settings)?.probe().await?;
            Ok(format!("{space_count} spaces visible"))
        }
        ServiceName::Asana => {
            let user = AsanaClient::new(settings)?.probe().await?;
            Ok(format!("authenticated as {}", user.name))
        }
        ServiceName::Testrail => {
            let user = TestRailClient::new(settings)?.probe().await?;
            Ok(format!("authenticated as {}", user.name))
        }
    }
}

fn connectivity_fix(service: ServiceName, error: &switchboard::SwitchboardError) -> String {
    let prefix = service.as_str().to_uppercase();
    match error.kind() {
        "timeout" => format!("Raise {prefix}_TIMEOUT_SECS or check network latency"),
        "connection" => "Check the base URL, VPN and firewall settings".to_string(),
        "http" => "Check the credential; a 401/403 means it was rejected".to_string(),
        _ => "Check the base URL and credential for this service".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_services_is_a_warning() {
        let mut checks = Vec::new();
        check_configured_services(&SwitchboardConfig::default(), &mut checks);

        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].status, CheckStatus::Warning);
        assert!(checks[0].fix.is_some());
    }

    #[test]
    fn test_unconfigured_services_render_without_warnings() {
        let mut checks = Vec::new();
        check_service_settings(&SwitchboardConfig::default(), &mut checks);

        assert_eq!(checks.len(), 5);
        assert!(checks.iter().all(|c| c.status == CheckStatus::Ok));
        assert!(checks.iter().all(|c| c.message == "not configured"));
    }

    #[test]
    fn test_configured_service_reports_settings() {
        use switchboard::config::Credential;

        let jira = ServiceConfig::new("https://jira.example.com", Credential::new("token"))
            .expect("valid config");
        let config = SwitchboardConfig {
            jira: Some(jira),
            ..Default::default()
        };

        let mut checks = Vec::new();
        check_configured_services(&config, &mut checks);
        check_service_settings(&config, &mut checks);

        assert!(checks[0].message.contains("jira"));
        let jira_check = checks
            .iter()
            .find(|c| c.name == "jira configuration")
            .expect("jira check present");
        assert!(jira_check.message.contains("https://jira.example.com"));
        assert!(jira_check.message.contains("bearer"));
    }

    #[test]
    fn test_disabled_tls_is_a_warning() {
        use switchboard::config::Credential;

        let testrail =
            ServiceConfig::new("https://testrail.example.com", Credential::new("u:k"))
                .expect("valid config")
                .with_verify_tls(false);
        let config = SwitchboardConfig {
            testrail: Some(testrail),
            ..Default::default()
        };

        let mut checks = Vec::new();
        check_service_settings(&config, &mut checks);

        let tls_check = checks
            .iter()
            .find(|c| c.name == "testrail TLS verification")
            .expect("TLS check present");
        assert_eq!(tls_check.status, CheckStatus::Warning);
        assert!(tls_check
            .fix
            .as_deref()
            .is_some_and(|f| f.contains("TESTRAIL_DISABLE_TLS_VERIFY")));
    }

    #[test]
    fn test_required_variables_cover_every_service() {
        for service in ServiceName::ALL {
            assert!(!required_variables(service).is_empty());
        }
        assert!(required_variables(ServiceName::Testrail).contains("TESTRAIL_API_KEY"));
    }
}
