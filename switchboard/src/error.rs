//! Unified error handling for the Switchboard library
//!
//! This module provides the typed error hierarchy shared by the transport,
//! response mapping, and tool layers. Every tool invocation ends in exactly
//! one of these variants; nothing else escapes to the MCP host.

use std::fmt;
use std::io;
use thiserror::Error;

/// The main error type for the Switchboard library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SwitchboardError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Bad or missing caller input; detected before any network activity
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required credential, URL, or other setting unset or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network-level failure reaching the remote host (DNS, refused, TLS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request exceeded the configured time bound
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Remote returned a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Remote returned 2xx but the payload was missing its identifying field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Every markup converter strategy in the fallback chain failed
    #[error("Markup conversion failed: {0}")]
    ParserUnavailable(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Generic error with context
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SwitchboardError {
    /// Stable machine-readable classification used in error envelopes.
    ///
    /// Callers branch on this string (or on the variant itself), never on
    /// message text.
    pub fn kind(&self) -> &'static str {
        match self {
            SwitchboardError::Validation(_) => "validation",
            SwitchboardError::Configuration(_) => "configuration",
            SwitchboardError::Connection(_) => "connection",
            SwitchboardError::Timeout { .. } => "timeout",
            SwitchboardError::Http { .. } => "http",
            SwitchboardError::MalformedResponse(_) => "malformed_response",
            SwitchboardError::ParserUnavailable(_) => "parser_unavailable",
            _ => "internal",
        }
    }

    /// True for errors the caller could fix by correcting the input
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            SwitchboardError::Validation(_) | SwitchboardError::Configuration(_)
        )
    }
}

/// Result type alias for Switchboard operations
pub type Result<T> = std::result::Result<T, SwitchboardError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| SwitchboardError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| SwitchboardError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}

/// Error chain formatter for detailed error reporting
pub struct ErrorChain<'a>(&'a dyn std::error::Error);

impl<'a> fmt::Display for ErrorChain<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.0)?;

        let mut current = self.0.source();
        let mut level = 1;

        while let Some(err) = current {
            writeln!(f, "{:indent$}Caused by: {}", "", err, indent = level * 2)?;
            current = err.source();
            level += 1;
        }

        Ok(())
    }
}

/// Extension trait for error types to format the full error chain
pub trait ErrorChainExt {
    /// Format the full error chain
    fn error_chain(&self) -> ErrorChain<'_>;
}

impl<E: std::error::Error> ErrorChainExt for E {
    fn error_chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }
}
