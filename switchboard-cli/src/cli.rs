use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::io;
use switchboard::ServiceName;

/// Services selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceArg {
    Jira,
    Bitbucket,
    Confluence,
    Asana,
    Testrail,
}

impl From<ServiceArg> for ServiceName {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Jira => ServiceName::Jira,
            ServiceArg::Bitbucket => ServiceName::Bitbucket,
            ServiceArg::Confluence => ServiceName::Confluence,
            ServiceArg::Asana => ServiceName::Asana,
            ServiceArg::Testrail => ServiceName::Testrail,
        }
    }
}

/// Resolve `--service` flags into the services to register.
///
/// No flags means every service; repeated flags are deduplicated while
/// keeping the order they were given in.
pub fn resolve_services(args: &[ServiceArg]) -> Vec<ServiceName> {
    if args.is_empty() {
        return ServiceName::ALL.to_vec();
    }

    let mut services = Vec::new();
    for arg in args {
        let name = ServiceName::from(*arg);
        if !services.contains(&name) {
            services.push(name);
        }
    }
    services
}

#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(version)]
#[command(about = "An MCP server exposing Jira, Bitbucket, Confluence, Asana and TestRail as tools")]
#[command(long_about = "
switchboard is an MCP (Model Context Protocol) server that adapts five
engineering platforms into assistant tools: Jira, Bitbucket Server,
Confluence, Asana and TestRail. Services are configured entirely through
environment variables; a service with no configuration still registers its
tools and answers every call with a configuration error.

Example usage:
  switchboard serve                 # Serve all five adapters over stdio
  switchboard serve --service jira  # Serve only the Jira tools
  switchboard doctor                # Check configuration and connectivity
  switchboard completion bash > ~/.bashrc.d/switchboard  # Bash completions
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server (default when invoked via stdio)
    #[command(long_about = "
Runs switchboard as an MCP server over stdio. This is the mode MCP hosts
(e.g. Claude Code) invoke. The server will:

- Read service configuration from the environment once at startup
- Register tools for the selected services (all five by default)
- Answer calls for unconfigured services with configuration errors
- Log to ~/.switchboard/mcp.log, since stdout belongs to the protocol

Examples:
  switchboard serve
  switchboard serve --service jira --service testrail
")]
    Serve {
        /// Only serve the named service (repeatable; default is all five)
        #[arg(long = "service", value_enum)]
        services: Vec<ServiceArg>,
    },
    /// Diagnose configuration and connectivity issues
    #[command(long_about = "
Runs diagnostics to help troubleshoot adapter setup. The doctor command
checks:

- Which services have configuration in the environment
- Whether base URLs and timeouts parse
- TLS verification settings
- Live connectivity and credentials, one probe per configured service

Exit codes:
  0 - All checks passed
  1 - Warnings found
  2 - Errors found

Example:
  switchboard doctor
")]
    Doctor,
    /// Generate shell completion scripts
    #[command(long_about = "
Generates shell completion scripts for the switchboard command.

Supported shells: bash, zsh, fish, powershell, elvish

Examples:
  # Bash
  switchboard completion bash > ~/.local/share/bash-completion/completions/switchboard

  # Zsh
  switchboard completion zsh > ~/.zfunc/_switchboard

  # Fish
  switchboard completion fish > ~/.config/fish/completions/switchboard.fish
")]
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_command_structure() {
        let result = Cli::try_parse_from_args(["switchboard", "--help"]);
        // --help exits with a special error type
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_no_subcommand() {
        let result = Cli::try_parse_from_args(["switchboard"]);
        assert!(result.is_ok());
        assert!(result.unwrap().command.is_none());
    }

    #[test]
    fn test_cli_serve_defaults_to_all_services() {
        let cli = Cli::try_parse_from_args(["switchboard", "serve"]).unwrap();
        let Some(Commands::Serve { services }) = cli.command else {
            panic!("Expected Serve command");
        };
        assert!(services.is_empty());
        assert_eq!(resolve_services(&services), ServiceName::ALL.to_vec());
    }

    #[test]
    fn test_cli_serve_with_repeated_service_flags() {
        let cli = Cli::try_parse_from_args([
            "switchboard",
            "serve",
            "--service",
            "jira",
            "--service",
            "testrail",
            "--service",
            "jira",
        ])
        .unwrap();

        let Some(Commands::Serve { services }) = cli.command else {
            panic!("Expected Serve command");
        };
        assert_eq!(
            resolve_services(&services),
            vec![ServiceName::Jira, ServiceName::Testrail]
        );
    }

    #[test]
    fn test_cli_rejects_unknown_service() {
        let result =
            Cli::try_parse_from_args(["switchboard", "serve", "--service", "gitlab"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_doctor_subcommand() {
        let cli = Cli::try_parse_from_args(["switchboard", "doctor"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Doctor)));
    }

    #[test]
    fn test_cli_completion_subcommand() {
        let cli = Cli::try_parse_from_args(["switchboard", "completion", "bash"]).unwrap();
        let Some(Commands::Completion { shell }) = cli.command else {
            panic!("Expected Completion command");
        };
        assert_eq!(shell, clap_complete::Shell::Bash);
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from_args(["switchboard", "--verbose", "doctor"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);

        let cli = Cli::try_parse_from_args(["switchboard", "--quiet", "doctor"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_service_arg_maps_to_every_service() {
        let args = [
            ServiceArg::Jira,
            ServiceArg::Bitbucket,
            ServiceArg::Confluence,
            ServiceArg::Asana,
            ServiceArg::Testrail,
        ];
        let mapped: Vec<ServiceName> = args.iter().map(|a| ServiceName::from(*a)).collect();
        assert_eq!(mapped, ServiceName::ALL.to_vec());
    }
}
