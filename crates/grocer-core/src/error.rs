//! # Error Types
//!
//! Domain-specific error types for grocer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocer-core errors (this file)                                        │
//! │  ├── CoreError        - Export and date errors                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  grocer-catalog errors (separate crate)                                │
//! │  └── CatalogError     - HTTP catalog failures                          │
//! │                                                                         │
//! │  Shell errors (in app)                                                 │
//! │  └── CommandError     - What the user sees as a notice                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │        CatalogError ────────────────┴──► CommandError → notice         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ledger operations have no error variants: every transition leaves the
//! cart valid, so there is nothing to report.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A reference date could not be parsed.
    #[error("Invalid date '{input}': expected dd-mm-yyyy")]
    InvalidDate { input: String },

    /// The export document could not be serialized.
    #[error("Failed to serialize export: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These block the originating action (e.g. item creation) and never
/// have side effects.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a URL without a scheme).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {}", allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
