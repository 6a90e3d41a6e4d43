//! Error types for Folio.
//!
//! Every construction failure aborts the enclosing call; there is no
//! partially built page or tree. Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation hints for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Unsupported Input Shape
//!   Reason: input 'book' is a scalar, expected a table or a record with table fields
//!   Fix: Pass a Table, or implement TableFields for the record type.
//! ```
//!
//! # Structured Output
//!
//! ```json
//! {
//!   "code": 20,
//!   "category": "input",
//!   "message": "input 'book' is a scalar, expected a table or a record with table fields",
//!   "context": { "label": "book", "kind": "scalar" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Folio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Storage format and configuration errors.
    Config,
    /// Page input errors (labels, input shapes).
    Input,
    /// Report tree structure errors.
    Structure,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Structure => write!(f, "structure"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Folio.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("invalid storage format '{token}', expected one of csv_embedded, json_embedded, csv_external, json_external, parquet")]
    InvalidStorageFormat { token: String },

    #[error("configuration error: {0}")]
    Config(String),

    // Input errors (20-29)
    #[error("input '{label}' is a {kind}, expected a table or a record with table fields")]
    UnsupportedInputShape { label: String, kind: String },

    #[error("invalid label: {0:?}")]
    InvalidLabel(String),

    // Structure errors (30-39)
    #[error("{constructor} requires at least one child node")]
    EmptyTree { constructor: &'static str },

    #[error("pages '{first}' and '{second}' both resolve to output path '{path}'")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: Structure errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidStorageFormat { .. } => 10,
            Error::Config(_) => 11,
            Error::UnsupportedInputShape { .. } => 20,
            Error::InvalidLabel(_) => 21,
            Error::EmptyTree { .. } => 30,
            Error::PathCollision { .. } => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidStorageFormat { .. } | Error::Config(_) => ErrorCategory::Config,
            Error::UnsupportedInputShape { .. } | Error::InvalidLabel(_) => ErrorCategory::Input,
            Error::EmptyTree { .. } | Error::PathCollision { .. } => ErrorCategory::Structure,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidStorageFormat { .. } => {
                "Use one of: csv_embedded, json_embedded, csv_external, json_external, parquet."
            }
            Error::Config(_) => "Check the report configuration file for typos and invalid values.",
            Error::UnsupportedInputShape { .. } => {
                "Pass a Table, or implement TableFields for the record type."
            }
            Error::InvalidLabel(_) => {
                "Labels must not be blank; field names must be non-empty and contain no '.'."
            }
            Error::EmptyTree { .. } => "Supply at least one page or sub-report as a child.",
            Error::PathCollision { .. } => {
                "Rename one of the pages so their titles sanitize to different tokens."
            }
            Error::Io(_) => "Check that the file exists and is readable.",
            Error::Json(_) => "Invalid JSON in file. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidStorageFormat { .. } => "Invalid Storage Format",
            Error::Config(_) => "Configuration Error",
            Error::UnsupportedInputShape { .. } => "Unsupported Input Shape",
            Error::InvalidLabel(_) => "Invalid Label",
            Error::EmptyTree { .. } => "Empty Report Tree",
            Error::PathCollision { .. } => "Output Path Collision",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Additional structured context (e.g., label, token).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidStorageFormat { token } => {
                context.insert("token".to_string(), serde_json::json!(token));
            }
            Error::UnsupportedInputShape { label, kind } => {
                context.insert("label".to_string(), serde_json::json!(label));
                context.insert("kind".to_string(), serde_json::json!(kind));
            }
            Error::EmptyTree { constructor } => {
                context.insert("constructor".to_string(), serde_json::json!(constructor));
            }
            Error::PathCollision {
                path,
                first,
                second,
            } => {
                context.insert("path".to_string(), serde_json::json!(path));
                context.insert("first".to_string(), serde_json::json!(first));
                context.insert("second".to_string(), serde_json::json!(second));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
