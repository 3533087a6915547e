//! # Catalog Settings
//!
//! Where the catalog lives and how long to wait for it.
//!
//! ```toml
//! [catalog]
//! server_url = "http://localhost:3000"
//! timeout_secs = 10
//! ```

use serde::{Deserialize, Serialize};

use grocer_core::validation::validate_server_url;
use grocer_core::ValidationError;

/// Connection settings for [`crate::CatalogClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the catalog server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_server_url(&self.server_url)?;
        if self.timeout_secs == 0 {
            return Err(ValidationError::MustBePositive {
                field: "timeout_secs".to_string(),
            });
        }
        Ok(())
    }
}
