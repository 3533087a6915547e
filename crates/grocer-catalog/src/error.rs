//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest / serde_json / url errors                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CommandError (in shell) ← Printed as a non-blocking notice            │
//! │                                                                         │
//! │  The cart never sees these errors.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grocer_core::ValidationError;
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured server URL could not be parsed.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server URL cannot carry a path (e.g. `mailto:`).
    #[error("Catalog URL cannot be used as a base: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Connection refused, DNS failure, reset, etc.
    #[error("Catalog unreachable: {0}")]
    Transport(String),

    /// The request took longer than the configured timeout.
    #[error("Catalog request timed out after {0} seconds")]
    Timeout(u64),

    /// Non-success HTTP status.
    #[error("Catalog returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// HTTP succeeded but the envelope reported a different status.
    ///
    /// ## When This Occurs
    /// - Create answered with anything but 201
    /// - Delete answered with anything but 200
    #[error("Catalog rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The body was not the expected JSON envelope.
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    /// Request rejected locally before being sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CatalogError {
    /// Whether retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Transport(_) | CatalogError::Timeout(_) => true,
            CatalogError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(CatalogError::Timeout(10).is_retryable());
        assert!(CatalogError::Status {
            status: 503,
            message: "busy".to_string()
        }
        .is_retryable());
        assert!(!CatalogError::Status {
            status: 404,
            message: "gone".to_string()
        }
        .is_retryable());
        assert!(!CatalogError::Decode("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_messages() {
        let err = CatalogError::Rejected {
            status: 409,
            message: "Product already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog rejected the request (409): Product already exists"
        );
    }
}
