//! # Cart Ledger
//!
//! The ordered, de-duplicated list of what the household wants to buy.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  User Action              Operation              Snapshot Change        │
//! │  ───────────              ─────────              ───────────────        │
//! │                                                                         │
//! │  Tap "Add" ─────────────► add_or_merge() ──────► qty += n  or  push     │
//! │                                                                         │
//! │  Tap "+" / "-" ─────────► adjust_quantity() ───► qty ± step (≥ floor)   │
//! │                                                                         │
//! │  Tap trash ─────────────► remove() ────────────► entry dropped          │
//! │                                                                         │
//! │  NOTE: Every operation maps a valid snapshot to a valid snapshot.       │
//! │        Ids stay unique, quantities stay > 0, order is insertion order.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Cart`] is the immutable snapshot: its operations take `&self` and return
//! the next snapshot. [`CartLedger`] is the session's handle on the current
//! snapshot plus the [`PolicyTable`] used to pick a policy for new entries.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::policy::{round_to, PolicyTable, QuantityPolicy};
use crate::types::{CartEntry, CatalogItem, Direction};
use crate::MAX_QUANTITY_PRECISION;

// =============================================================================
// Cart Snapshot
// =============================================================================

/// A point-in-time view of the cart.
///
/// ## Invariants
/// - No two entries share an `id`
/// - Every entry has `quantity > 0`
/// - Entries appear in first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities, as shown on the cart badge.
    pub fn total_quantity(&self) -> f64 {
        round_to(
            self.entries.iter().map(|e| e.quantity).sum(),
            MAX_QUANTITY_PRECISION,
        )
    }

    /// Adds `quantity` of `item`, merging into an existing entry with the same id.
    ///
    /// ## Behavior
    /// - Id already present: quantity increases, position is kept
    /// - Id not present: a new entry is appended using `policy`
    /// - Quantity not positive (or not finite): the cart is returned unchanged
    ///
    /// The added amount is kept as given, so a merge is exactly `q1 + q2`.
    /// Only float noise past [`MAX_QUANTITY_PRECISION`] places is rounded off;
    /// the policy's own precision applies to `+`/`-` steps, not to adds.
    ///
    /// The policy only applies to new entries. A merge keeps the policy the
    /// entry was created with.
    #[must_use]
    pub fn add_or_merge(&self, item: &CatalogItem, quantity: f64, policy: QuantityPolicy) -> Cart {
        if !(quantity.is_finite() && round_to(quantity, MAX_QUANTITY_PRECISION) > 0.0) {
            debug!(id = %item.id, quantity, "ignoring non-positive add");
            return self.clone();
        }

        let mut next = self.clone();
        match next.entries.iter_mut().find(|e| e.id == item.id) {
            Some(entry) => {
                entry.quantity = round_to(entry.quantity + quantity, MAX_QUANTITY_PRECISION);
                debug!(id = %item.id, quantity = entry.quantity, "merged into existing entry");
            }
            None => {
                let entry = CartEntry::from_item(item, quantity, policy);
                debug!(id = %entry.id, quantity = entry.quantity, "appended new entry");
                next.entries.push(entry);
            }
        }
        next
    }

    /// Moves an entry's quantity by `step` in `direction`.
    ///
    /// ## Behavior
    /// - Increase: `quantity + step`, no upper bound
    /// - Decrease: `max(floor, quantity - step)`, never removes the entry
    /// - The sum is rounded to the entry's policy precision before the floor
    ///   is applied, so a floor finer than the precision still holds
    /// - Unknown id, or a step or floor that is not positive: no-op
    #[must_use]
    pub fn adjust_quantity(&self, id: &str, direction: Direction, step: f64, floor: f64) -> Cart {
        if !(step.is_finite() && step > 0.0 && floor.is_finite() && floor > 0.0) {
            debug!(id, step, floor, "ignoring adjustment with non-positive step or floor");
            return self.clone();
        }

        let mut next = self.clone();
        if let Some(entry) = next.entries.iter_mut().find(|e| e.id == id) {
            entry.quantity = match direction {
                Direction::Increase => entry.policy.round(entry.quantity + step),
                Direction::Decrease => entry.policy.round(entry.quantity - step).max(floor),
            };
            debug!(id, ?direction, quantity = entry.quantity, "adjusted quantity");
        }
        next
    }

    /// [`Cart::adjust_quantity`] using the entry's own step and floor.
    #[must_use]
    pub fn step_quantity(&self, id: &str, direction: Direction) -> Cart {
        match self.get(id) {
            Some(entry) => {
                let QuantityPolicy { step, floor, .. } = entry.policy;
                self.adjust_quantity(id, direction, step, floor)
            }
            None => self.clone(),
        }
    }

    /// Deletes an entry regardless of its quantity. Unknown id: no-op.
    #[must_use]
    pub fn remove(&self, id: &str) -> Cart {
        let mut next = self.clone();
        next.entries.retain(|e| e.id != id);
        if next.len() != self.len() {
            debug!(id, "removed entry");
        }
        next
    }
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// Holds the session's current cart snapshot.
///
/// Every method swaps in the next snapshot and returns it. Callers that need
/// a stable view for export take [`CartLedger::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    cart: Cart,
    policies: PolicyTable,
}

impl CartLedger {
    /// Creates an empty ledger that resolves policies through `policies`.
    pub fn new(policies: PolicyTable) -> Self {
        CartLedger {
            cart: Cart::new(),
            policies,
        }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Owned copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    pub fn add_or_merge(&mut self, item: &CatalogItem, quantity: f64) -> &Cart {
        let policy = self.policies.resolve(&item.measure_unit);
        self.cart = self.cart.add_or_merge(item, quantity, policy);
        &self.cart
    }

    pub fn adjust_quantity(&mut self, id: &str, direction: Direction, step: f64, floor: f64) -> &Cart {
        self.cart = self.cart.adjust_quantity(id, direction, step, floor);
        &self.cart
    }

    pub fn step_quantity(&mut self, id: &str, direction: Direction) -> &Cart {
        self.cart = self.cart.step_quantity(id, direction);
        &self.cart
    }

    pub fn remove(&mut self, id: &str) -> &Cart {
        self.cart = self.cart.remove(id);
        &self.cart
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> &Cart {
        self.cart = Cart::new();
        &self.cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
