//! Doctor module for Switchboard diagnostic tools
//!
//! Diagnoses adapter setup: which services have configuration, whether the
//! configured values parse, and whether each configured service answers an
//! authenticated probe. The probes are the same requests the
//! `<service>_healthcheck` tools make, one per service.
//!
//! # Usage
//!
//! ```no_run
//! use switchboard_cli::doctor::Doctor;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut doctor = Doctor::new();
//! let exit_code = doctor.run_diagnostics().await?;
//! # Ok(())
//! # }
//! ```
//!
//! The doctor returns exit codes:
//! - 0: All checks passed
//! - 1: Some warnings detected
//! - 2: Errors detected

use anyhow::Result;
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub use types::*;

pub mod checks;
pub mod types;

/// One row of the rendered diagnostics table
#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Check")]
    name: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl CheckRow {
    fn from_check(check: &Check) -> Self {
        let word = match check.status {
            CheckStatus::Ok => "ok",
            CheckStatus::Warning => "warning",
            CheckStatus::Error => "error",
        };
        Self {
            status: format!("{} {}", check.status.symbol(), word),
            name: check.name.clone(),
            details: check.message.clone(),
        }
    }
}

/// Main diagnostic tool for Switchboard adapter health checks
///
/// Accumulates check results and renders them as a table with a summary
/// line and fix suggestions for anything that is not OK.
pub struct Doctor {
    checks: Vec<Check>,
}

impl Doctor {
    /// Create a new Doctor instance for running diagnostics
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Run all diagnostic checks
    ///
    /// # Returns
    ///
    /// Returns an exit code:
    /// - 0: All checks passed
    /// - 1: Warnings detected
    /// - 2: Errors detected
    pub async fn run_diagnostics(&mut self) -> Result<i32> {
        let use_color = crate::cli::Cli::should_use_color();

        if use_color {
            println!("{}", "Switchboard Doctor".bold().blue());
            println!("{}", "Running diagnostics...".dimmed());
        } else {
            println!("Switchboard Doctor");
            println!("Running diagnostics...");
        }
        println!();

        if let Some(config) = checks::check_environment(&mut self.checks) {
            checks::check_configured_services(&config, &mut self.checks);
            checks::check_service_settings(&config, &mut self.checks);
            checks::check_connectivity(&config, &mut self.checks).await;
        }

        self.print_results(use_color);

        Ok(self.get_exit_code())
    }

    /// Render the checks as a table, then fixes and the summary line
    fn print_results(&self, use_color: bool) {
        let rows: Vec<CheckRow> = self.checks.iter().map(CheckRow::from_check).collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{table}");
        println!();

        self.print_fixes(use_color);
        self.print_summary(use_color);
    }

    /// List fix suggestions for every check that did not pass
    fn print_fixes(&self, use_color: bool) {
        let fixes: Vec<&Check> = self
            .checks
            .iter()
            .filter(|c| c.status != CheckStatus::Ok && c.fix.is_some())
            .collect();

        if fixes.is_empty() {
            return;
        }

        if use_color {
            println!("{}", "Suggested fixes:".bold().yellow());
        } else {
            println!("Suggested fixes:");
        }
        for check in fixes {
            if let Some(fix) = &check.fix {
                if use_color {
                    println!("  {} {}: {}", "→".dimmed(), check.name, fix.dimmed());
                } else {
                    println!("  → {}: {}", check.name, fix);
                }
            }
        }
        println!();
    }

    /// Print the summary of check results
    fn print_summary(&self, use_color: bool) {
        let ok_count = self.count_status(CheckStatus::Ok);
        let warning_count = self.count_status(CheckStatus::Warning);
        let error_count = self.count_status(CheckStatus::Error);

        if use_color {
            println!("{}", "Summary:".bold().green());
        } else {
            println!("Summary:");
        }

        match (error_count, warning_count) {
            (0, 0) => {
                println!("  All checks passed!");
            }
            (0, _) => {
                if use_color {
                    println!(
                        "  {} checks passed, {} warnings",
                        ok_count.to_string().green(),
                        warning_count.to_string().yellow()
                    );
                } else {
                    println!("  {ok_count} checks passed, {warning_count} warnings");
                }
            }
            _ => {
                if use_color {
                    println!(
                        "  {} checks passed, {} warnings, {} errors",
                        ok_count.to_string().green(),
                        warning_count.to_string().yellow(),
                        error_count.to_string().red()
                    );
                } else {
                    println!(
                        "  {ok_count} checks passed, {warning_count} warnings, {error_count} errors"
                    );
                }
            }
        }
    }

    fn count_status(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    /// Get exit code based on check results
    ///
    /// # Returns
    ///
    /// - 0: All checks passed (no errors or warnings)
    /// - 1: At least one warning detected
    /// - 2: At least one error detected
    pub fn get_exit_code(&self) -> i32 {
        let has_error = self.checks.iter().any(|c| c.status == CheckStatus::Error);
        let has_warning = self.checks.iter().any(|c| c.status == CheckStatus::Warning);

        let exit_code = if has_error {
            ExitCode::Error
        } else if has_warning {
            ExitCode::Warning
        } else {
            ExitCode::Success
        };

        exit_code.into()
    }
}

impl Default for Doctor {
    fn default() -> Self {
        Self::new()
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
            "BITBUCKET_BASE_URL",
            "BITBUCKET_AUTH_TOKEN",
            "CONFLUENCE_BASE_URL",
            "CONFLUENCE_AUTH_TOKEN",
            "ASANA_BASE_URL",
            "ASANA_AUTH_TOKEN",
            "TESTRAIL_URL",
            "TESTRAIL_USERNAME",
            "TESTRAIL_API_KEY",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_doctor_creation() {
        let doctor = Doctor::new();
        assert_eq!(doctor.checks.len(), 0);
    }

    #[test]
    fn test_check_status_exit_codes() {
        let mut doctor = Doctor::new();

        // All OK should return 0
        doctor.checks.push(Check {
            name: "Test OK".to_string(),
            status: CheckStatus::Ok,
            message: "Everything is fine".to_string(),
            fix: None,
        });
        assert_eq!(doctor.get_exit_code(), 0);

        // Warning should return 1
        doctor.checks.push(Check {
            name: "Test Warning".to_string(),
            status: CheckStatus::Warning,
            message: "Something might be wrong".to_string(),
            fix: Some("Consider fixing this".to_string()),
        });
        assert_eq!(doctor.get_exit_code(), 1);

        // Error should return 2
        doctor.checks.push(Check {
            name: "Test Error".to_string(),
            status: CheckStatus::Error,
            message: "Something is definitely wrong".to_string(),
            fix: Some("You must fix this".to_string()),
        });
        assert_eq!(doctor.get_exit_code(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_run_diagnostics_without_configuration_warns() {
        clear_service_env();

        let mut doctor = Doctor::new();
        let exit_code = doctor.run_diagnostics().await.expect("diagnostics run");

        // No services configured is a warning, and nothing was probed
        assert_eq!(exit_code, 1);
        assert!(!doctor.checks.is_empty());
        assert!(doctor
            .checks
            .iter()
            .all(|c| !c.name.ends_with("connectivity")));
    }
}
