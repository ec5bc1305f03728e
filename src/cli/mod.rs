//! CLI support for options-record
//!
//! Provides programmatic access to the `optrec` commands so other tools can
//! check and evaluate option records the same way the binary does.

mod check;
mod convert;
#[cfg(feature = "cli")]
pub mod logging;

pub use check::{CheckOptions, CheckResult, EnvScope, execute_check, format_tokens};
pub use convert::{json_to_value, scope_from_json, value_to_json};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parse or evaluation error
    Record(crate::Error),
    /// JSON parsing error
    Json(serde_json::Error),
    /// JSON given for a scope is not an object
    InvalidScope(String),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Record(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::InvalidScope(kind) => {
                write!(f, "Scope must be a JSON object, got {}", kind)
            }
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Pass a record or pipe one to stdin."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Record(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::Error> for CliError {
    fn from(e: crate::Error) -> Self {
        CliError::Record(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
