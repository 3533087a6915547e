//! # Domain Types
//!
//! Core domain types shared by the ledger, the renderer and the catalog client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add_or_merge   ┌─────────────────┐               │
//! │  │  CatalogItem    │ ───────────────► │   CartEntry     │               │
//! │  │  ─────────────  │                  │  ─────────────  │               │
//! │  │  id (catalog)   │                  │  id             │               │
//! │  │  name           │                  │  name           │               │
//! │  │  category       │                  │  measure_unit   │               │
//! │  │  measure_unit   │                  │  quantity (f64) │               │
//! │  │  image_ref      │                  │  policy         │               │
//! │  └─────────────────┘                  └─────────────────┘               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │ NewCatalogItem  │   │ CategoryChoice  │                              │
//! │  │  (create form)  │   │ Grocery         │                              │
//! │  │                 │   │ Bathroom        │                              │
//! │  │                 │   │ Other(custom)   │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Item ids are assigned by the external catalog and treated as opaque strings.
//! The cart never generates ids of its own.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::{round_to, QuantityPolicy};
use crate::MAX_QUANTITY_PRECISION;

// =============================================================================
// Catalog Item
// =============================================================================

/// An item as listed by the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Catalog-assigned identifier.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Informational grouping ("Grocery", "Bathroom", or a custom label).
    #[serde(default)]
    pub category: String,

    /// Unit label such as "kg" or "pcs". Opaque to the ledger.
    pub measure_unit: String,

    /// Reference to the item's picture, if the catalog has one.
    #[serde(default, rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One aggregated line item held in the cart.
///
/// The `policy` is resolved from the measure unit when the entry is first
/// inserted and stays with the entry, so a later config change never
/// re-interprets quantities already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub id: String,
    pub name: String,
    pub measure_unit: String,
    /// Always > 0 while the entry is in a cart.
    pub quantity: f64,
    pub category: String,
    pub policy: QuantityPolicy,
}

impl CartEntry {
    /// Builds a new entry from a catalog item. The quantity is kept as given,
    /// minus float noise.
    pub fn from_item(item: &CatalogItem, quantity: f64, policy: QuantityPolicy) -> Self {
        CartEntry {
            id: item.id.clone(),
            name: item.name.clone(),
            measure_unit: item.measure_unit.clone(),
            quantity: round_to(quantity, MAX_QUANTITY_PRECISION),
            category: item.category.clone(),
            policy,
        }
    }

    /// Quantity with its unit, as printed on the export: `"2.5 kg"`.
    pub fn quantity_label(&self) -> String {
        format!("{} {}", self.quantity, self.measure_unit)
    }
}

// =============================================================================
// Adjustment Direction
// =============================================================================

/// Which way a quantity adjustment goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

// =============================================================================
// Catalog Creation
// =============================================================================

/// Preset categories offered when creating an item.
pub const PRESET_CATEGORIES: [&str; 3] = ["Grocery", "Bathroom", "Other"];

/// Category picked on the create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryChoice {
    Grocery,
    Bathroom,
    /// "Other" plus the user's own category name.
    Other(String),
}

impl CategoryChoice {
    /// Parses a preset label (case-insensitive). `Other` takes the custom
    /// text, which may still be empty here; validation rejects that later.
    pub fn parse(label: &str, custom: Option<&str>) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "grocery" => Some(CategoryChoice::Grocery),
            "bathroom" => Some(CategoryChoice::Bathroom),
            "other" => Some(CategoryChoice::Other(
                custom.unwrap_or_default().trim().to_string(),
            )),
            _ => None,
        }
    }

    /// The category string submitted to the catalog.
    pub fn label(&self) -> &str {
        match self {
            CategoryChoice::Grocery => "Grocery",
            CategoryChoice::Bathroom => "Bathroom",
            CategoryChoice::Other(custom) => custom.as_str(),
        }
    }
}

/// Form data for a new catalog item, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogItem {
    pub name: String,
    pub measure_unit: String,
    pub category: Option<CategoryChoice>,
}

/// A validated create request, ready to be sent to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemDraft {
    pub name: String,
    pub measure_unit: String,
    pub category: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_json_shape() {
        let json = r#"{"id":"a1","name":"Milk","category":"Grocery","measureUnit":"l","imageUrl":"milk.png"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.measure_unit, "l");
        assert_eq!(item.image_ref.as_deref(), Some("milk.png"));
    }

    #[test]
    fn test_catalog_item_without_image() {
        let json = r#"{"id":"a1","name":"Soap","measureUnit":"pcs"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert!(item.image_ref.is_none());
        assert_eq!(item.category, "");
    }

    #[test]
    fn test_quantity_label() {
        let item = CatalogItem {
            id: "rice".to_string(),
            name: "Rice".to_string(),
            category: "Grocery".to_string(),
            measure_unit: "kg".to_string(),
            image_ref: None,
        };
        let entry = CartEntry::from_item(&item, 2.5, QuantityPolicy::fractional(0.25, 0.25, 2));
        assert_eq!(entry.quantity_label(), "2.5 kg");

        let whole = CartEntry::from_item(&item, 2.0, QuantityPolicy::whole());
        assert_eq!(whole.quantity_label(), "2 kg");
    }

    #[test]
    fn test_category_choice_parse() {
        assert_eq!(
            CategoryChoice::parse("grocery", None),
            Some(CategoryChoice::Grocery)
        );
        assert_eq!(
            CategoryChoice::parse("Other", Some(" Pets ")),
            Some(CategoryChoice::Other("Pets".to_string()))
        );
        assert_eq!(CategoryChoice::parse("garden", None), None);
        assert_eq!(CategoryChoice::Other("Pets".to_string()).label(), "Pets");
    }
}
