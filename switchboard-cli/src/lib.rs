//! Switchboard CLI library
//!
//! Command definitions, diagnostics and the serve loop shared by the
//! `switchboard` and `swb` binaries (and re-exported for the CLI tests).

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Shell completion generation
pub mod completions;
/// Configuration and connectivity diagnostics
pub mod doctor;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log writer for MCP serve mode
pub mod logging;

use clap::CommandFactory;
use is_terminal::IsTerminal;
use switchboard::ServiceName;

use cli::{resolve_services, Cli, Commands};
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};

/// Parse arguments, set up logging and dispatch to the selected command.
///
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse_args();

    // Fast path for help
    if cli.command.is_none() {
        Cli::command().print_help().expect("Failed to print help");
        return EXIT_SUCCESS;
    }

    // In MCP mode stdout carries the protocol, so logs must go elsewhere
    let is_mcp_mode = matches!(cli.command, Some(Commands::Serve { .. }))
        && !std::io::stdin().is_terminal();

    let default_directive = if is_mcp_mode {
        // More verbose for MCP mode to help with host-side debugging
        "debug"
    } else if cli.quiet {
        "error"
    } else if cli.debug {
        "debug"
    } else if cli.verbose {
        "trace"
    } else {
        "info"
    };

    if is_mcp_mode {
        init_file_logging(default_directive);
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(default_directive))
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Some(Commands::Serve { services }) => {
            tracing::info!("Starting MCP server");
            run_serve(&resolve_services(&services)).await
        }
        Some(Commands::Doctor) => {
            tracing::info!("Running diagnostics");
            run_doctor().await
        }
        Some(Commands::Completion { shell }) => {
            tracing::info!("Generating completion for {:?}", shell);
            run_completions(shell)
        }
        None => {
            // Handled by the fast path above
            unreachable!()
        }
    }
}

/// `RUST_LOG` wins over the flag-derived default
fn env_filter(default_directive: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive))
}

/// Log to `~/.switchboard/mcp.log` (or `SWITCHBOARD_LOG_FILE`), falling back
/// to stderr when the file cannot be opened.
fn init_file_logging(default_directive: &str) {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    let log_dir = if let Some(home) = dirs::home_dir() {
        home.join(".switchboard")
    } else {
        PathBuf::from(".switchboard")
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {}: {e}", log_dir.display());
    }

    let log_filename =
        std::env::var("SWITCHBOARD_LOG_FILE").unwrap_or_else(|_| "mcp.log".to_string());
    let log_file = log_dir.join(log_filename);

    match fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
    {
        Ok(file) => {
            let shared = Arc::new(Mutex::new(file));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(default_directive))
                .with_writer(move || logging::FileWriterGuard::new(shared.clone()))
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            eprintln!("Failed to open log file {}, using stderr: {e}", log_file.display());
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(default_directive))
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run_serve(services: &[ServiceName]) -> i32 {
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;
    use switchboard::mcp::McpServer;
    use switchboard::SwitchboardConfig;
    use tokio_util::sync::CancellationToken;

    let config = match SwitchboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid service configuration: {e}");
            return EXIT_ERROR;
        }
    };

    let server = match McpServer::with_services(&config, services) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to create MCP server: {e}");
            return EXIT_ERROR;
        }
    };

    let names: Vec<&str> = services.iter().map(|s| s.as_str()).collect();
    tracing::info!(
        "Serving {} tools for: {}",
        server.tool_count(),
        names.join(", ")
    );

    // Set up cancellation token
    let ct = CancellationToken::new();
    let ct_clone = ct.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");

        tracing::info!("Shutdown signal received");
        ct_clone.cancel();
    });

    // Start the rmcp SDK server with stdio transport
    match serve_server(server, stdio()).await {
        Ok(_running_service) => {
            tracing::info!("MCP server started");

            // Wait for cancellation
            ct.cancelled().await;

            tracing::info!("MCP server exited");
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {e}");
            EXIT_WARNING
        }
    }
}

async fn run_doctor() -> i32 {
    let mut doctor = doctor::Doctor::new();
    match doctor.run_diagnostics().await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!("Doctor error: {e}");
            EXIT_ERROR
        }
    }
}

fn run_completions(shell: clap_complete::Shell) -> i32 {
    match completions::print_completion(shell) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("Completion error: {e}");
            EXIT_WARNING
        }
    }
}
