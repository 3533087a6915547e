//! # Validation Module
//!
//! Input validation for catalog requests made from the shell.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell command parsing (clap)                                 │
//! │  ├── Argument presence and types                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, custom category rules                   │
//! │  └── Failure blocks the action, nothing is sent                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog server                                               │
//! │  └── Its own checks, reported back as an envelope message              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocer_core::types::{CategoryChoice, NewCatalogItem};
//! use grocer_core::validation::validate_new_item;
//!
//! let form = NewCatalogItem {
//!     name: "Basmati Rice".to_string(),
//!     measure_unit: "kg".to_string(),
//!     category: Some(CategoryChoice::Grocery),
//! };
//! let draft = validate_new_item(&form).unwrap();
//! assert_eq!(draft.category, "Grocery");
//! ```

use crate::error::ValidationError;
use crate::types::{CatalogItemDraft, CategoryChoice, NewCatalogItem, PRESET_CATEGORIES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_MEASURE_UNIT_LEN: usize = 30;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn required_trimmed(value: &str, field: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates an item name: required, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    required_trimmed(name, "name", MAX_NAME_LEN)
}

/// Validates a measure unit: required, at most 30 characters.
pub fn validate_measure_unit(unit: &str) -> ValidationResult<String> {
    required_trimmed(unit, "measure unit", MAX_MEASURE_UNIT_LEN)
}

/// Validates a category choice.
///
/// ## Rules
/// - A category must be picked
/// - `Other` needs a non-empty custom name (at most 50 characters)
pub fn validate_category(category: Option<&CategoryChoice>) -> ValidationResult<String> {
    match category {
        None => Err(ValidationError::Required {
            field: "category".to_string(),
        }),
        Some(CategoryChoice::Other(custom)) => {
            required_trimmed(custom, "custom category", MAX_CATEGORY_LEN)
        }
        Some(preset) => Ok(preset.label().to_string()),
    }
}

/// Turns a typed category label into a [`CategoryChoice`].
///
/// The label must be one of the presets (case-insensitive). `custom` is only
/// read for `Other`.
pub fn parse_category(label: &str, custom: Option<&str>) -> ValidationResult<CategoryChoice> {
    CategoryChoice::parse(label, custom).ok_or_else(|| ValidationError::NotAllowed {
        field: "category".to_string(),
        allowed: PRESET_CATEGORIES.iter().map(|c| c.to_string()).collect(),
    })
}

/// Validates a create form and produces the request body.
///
/// Fields are checked in form order: name, measure unit, category.
pub fn validate_new_item(form: &NewCatalogItem) -> ValidationResult<CatalogItemDraft> {
    Ok(CatalogItemDraft {
        name: validate_item_name(&form.name)?,
        measure_unit: validate_measure_unit(&form.measure_unit)?,
        category: validate_category(form.category.as_ref())?,
    })
}

/// Validates a search term.
///
/// ## Rules
/// - Can be empty (means "list everything")
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(term.to_string())
}

/// Validates a base URL for the catalog server (`http://` or `https://`).
pub fn validate_server_url(url: &str) -> ValidationResult<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::Required {
            field: "server_url".to_string(),
        });
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidFormat {
            field: "server_url".to_string(),
            reason: format!("must start with http:// or https://, got: {}", url),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
