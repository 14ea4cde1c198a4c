//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::{CommandError, Error};
use crate::storage::BackendKind;
use serde::Serialize;
use std::path::Path;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Serialize)]
struct EntryReport<'a> {
    namespace: &'a str,
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    action: &'a str,
}

/// Formats a retrieved value. Text output is the raw value.
#[must_use]
pub fn format_value(namespace: &str, key: &str, value: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => format_json(&EntryReport {
            namespace,
            key,
            value: Some(value),
            action: "get",
        }),
    }
}

/// Formats the result of a `set`.
#[must_use]
pub fn format_set(namespace: &str, key: &str, size: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Stored {namespace}/{key} ({size} bytes)\n"),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "namespace": namespace,
                "key": key,
                "size": size,
                "action": "set",
            });
            format_json(&result)
        }
    }
}

/// Formats the result of a `remove`.
#[must_use]
pub fn format_remove(namespace: &str, key: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Removed {namespace}/{key}\n"),
        OutputFormat::Json => format_json(&EntryReport {
            namespace,
            key,
            value: None,
            action: "remove",
        }),
    }
}

/// Formats the resolved storage location.
#[must_use]
pub fn format_path(backend: BackendKind, location: &Path, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{backend}: {}\n", location.display()),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "backend": backend,
                "path": location.to_string_lossy(),
            });
            format_json(&result)
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            let kind = match error {
                Error::Storage(_) => "storage",
                Error::Io(_) => "io",
                Error::Command(CommandError::NotFound { .. }) => "not_found",
                Error::Command(_) => "command",
                Error::Config { .. } => "config",
            };
            let result = serde_json::json!({
                "error": kind,
                "message": error.to_string(),
            });
            format_json(&result)
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
