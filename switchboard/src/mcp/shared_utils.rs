//! Shared utilities for MCP operations
//!
//! This module provides common functionality used across MCP tool handlers
//! to reduce code duplication and ensure consistent behavior.

use crate::error::{Result, SwitchboardError};

/// Validation utilities for MCP requests
///
/// All checks run before any network activity; a failure here means the
/// invocation ends as a validation error with zero calls made.
pub struct McpValidation;

impl McpValidation {
    /// Validate string is not empty
    pub fn validate_not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(SwitchboardError::Validation(format!(
                "{} must not be empty",
                Self::capitalize_first_letter(field)
            )));
        }
        Ok(())
    }

    /// Validate a result-count limit is usable
    pub fn validate_limit(value: u32, field: &str) -> Result<()> {
        if value == 0 {
            return Err(SwitchboardError::Validation(format!(
                "{} must be at least 1",
                Self::capitalize_first_letter(field)
            )));
        }
        Ok(())
    }

    /// Helper function to capitalize the first letter of a string
    fn capitalize_first_letter(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        }
    }
}

/// Formatting utilities for consistent MCP responses
pub struct McpFormatter;

impl McpFormatter {
    /// Create a standardized summary for list operations
    pub fn format_list_summary(item_name: &str, count: usize, total: usize) -> String {
        if count == total {
            let plural_name = if count == 1 {
                item_name.to_string()
            } else {
                format!("{item_name}s")
            };
            format!("Found {count} {plural_name}")
        } else {
            let plural_name = if total == 1 {
                item_name.to_string()
            } else {
                format!("{item_name}s")
            };
            format!("Showing {count} of {total} {plural_name}")
        }
    }
}
