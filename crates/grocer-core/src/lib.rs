//! # grocer-core: Pure Business Logic for Grocer
//!
//! This crate is the **heart** of Grocer. It holds the cart ledger and the
//! export renderer as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocer Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (apps/grocer-cli)                      │   │
//! │  │    search ──► add / inc / dec / rm ──► export                   │   │
//! │  └─────────────┬───────────────────────────────┬───────────────────┘   │
//! │                │                               │                        │
//! │  ┌─────────────▼──────────────┐  ┌─────────────▼───────────────────┐   │
//! │  │  grocer-catalog (HTTP)     │  │  ★ grocer-core (THIS CRATE) ★   │   │
//! │  │  fetch / search / create   │  │                                 │   │
//! │  │  delete, stale-response    │  │  ┌────────┐ ┌────────┐ ┌──────┐ │   │
//! │  │  guard                     │  │  │ ledger │ │ export │ │policy│ │   │
//! │  └────────────────────────────┘  │  └────────┘ └────────┘ └──────┘ │   │
//! │                                  │  NO I/O • NO CLOCK • PURE       │   │
//! │                                  └─────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, CartEntry, create-form types)
//! - [`policy`] - Per-unit quantity step, floor and rounding
//! - [`ledger`] - Cart snapshots and the session ledger
//! - [`export`] - Paginated export documents
//! - [`validation`] - Create-form and search validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grocer_core::{CartLedger, CatalogItem, Direction, ExportRenderer, PolicyTable};
//!
//! let apple = CatalogItem {
//!     id: "apple".to_string(),
//!     name: "Apple".to_string(),
//!     category: "Grocery".to_string(),
//!     measure_unit: "pcs".to_string(),
//!     image_ref: None,
//! };
//!
//! let mut ledger = CartLedger::new(PolicyTable::default());
//! ledger.add_or_merge(&apple, 2.0);
//! ledger.add_or_merge(&apple, 1.0);
//! ledger.step_quantity("apple", Direction::Decrease);
//!
//! let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let doc = ExportRenderer::new().render(ledger.cart().entries(), date);
//!
//! assert_eq!(doc.rows().next().unwrap().quantity, "2 pcs");
//! assert_eq!(doc.name, "groceries_list_18Oct2026");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod ledger;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use export::{ExportDocument, ExportFormat, ExportRenderer};
pub use ledger::{Cart, CartLedger};
pub use policy::{PolicyTable, QuantityPolicy, UnitKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum data rows on one export page.
pub const PAGE_CAPACITY: usize = 25;

/// Most decimal places a quantity policy may keep.
pub const MAX_QUANTITY_PRECISION: u32 = 6;
