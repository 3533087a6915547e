//! # Command Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  > delete 42                                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<String, CommandError>                                    │  │
//! │  │         │                                                        │  │
//! │  │  Catalog Error? ──── CatalogError::Status(404) ─────┐            │  │
//! │  │         │                                           ▼            │  │
//! │  │  Validation Error? ─ ValidationError::Required ── CommandError   │  │
//! │  │         │                                           │            │  │
//! │  │  Success ──► reply printed                          ▼            │  │
//! │  │                                     "! [NOT_FOUND] ..." notice   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The loop keeps running; the cart is untouched by failed commands.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use grocer_catalog::CatalogError;
use grocer_core::{CoreError, ValidationError};

/// Error returned from shell commands.
///
/// ## Serialization
/// With `--json-notices` the shell prints failures as:
/// ```json
/// { "code": "CATALOG_UNAVAILABLE", "message": "Catalog unreachable: ..." }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown item or catalog resource
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Catalog could not be reached or timed out
    CatalogUnavailable,

    /// Catalog answered with a failure
    CatalogError,

    /// Nothing to export, or the file could not be written
    ExportError,

    /// Malformed command line
    Usage,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CatalogUnavailable => "CATALOG_UNAVAILABLE",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::ExportError => "EXPORT_ERROR",
            ErrorCode::Usage => "USAGE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CommandError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    pub fn export(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ExportError, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Usage, message)
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::validation(err.to_string())
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::InvalidDate { .. } => CommandError::validation(err.to_string()),
            CoreError::Serialization(e) => {
                tracing::error!("Export serialization failed: {}", e);
                CommandError::export("Failed to encode the export")
            }
        }
    }
}

impl From<CatalogError> for CommandError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => e.into(),
            CatalogError::Transport(_) | CatalogError::Timeout(_) => {
                CommandError::new(ErrorCode::CatalogUnavailable, err.to_string())
            }
            CatalogError::Status { status: 404, message } => {
                CommandError::new(ErrorCode::NotFound, message)
            }
            CatalogError::Status { .. } | CatalogError::Rejected { .. } => {
                CommandError::new(ErrorCode::CatalogError, err.to_string())
            }
            CatalogError::Decode(ref e) => {
                tracing::error!("Catalog response decode failed: {}", e);
                CommandError::new(ErrorCode::CatalogError, "Catalog sent an unreadable response")
            }
            CatalogError::InvalidUrl(_)
            | CatalogError::InvalidBaseUrl(_)
            | CatalogError::ClientBuild(_) => CommandError::new(ErrorCode::Internal, err.to_string()),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::export(format!("File error: {}", err))
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CommandError {}
