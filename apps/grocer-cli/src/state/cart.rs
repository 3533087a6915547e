//! # Cart State
//!
//! The session's cart, driven by shell commands.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shell Command            CartState              Ledger Transition      │
//! │  ─────────────            ─────────              ─────────────────      │
//! │                                                                         │
//! │  add <id> [qty] ────────► add() ───────────────► add_or_merge          │
//! │  inc <id> ──────────────► increase() ──────────► step_quantity(+)      │
//! │  dec <id> ──────────────► decrease() ──────────► step_quantity(-)      │
//! │  rm <id> / delete <id> ─► remove() ────────────► remove                │
//! │  clear ─────────────────► clear() ─────────────► empty cart            │
//! │                                                                         │
//! │  The shell reads one command at a time, so no lock is needed.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grocer_core::{Cart, CartEntry, CartLedger, CatalogItem, Direction, PolicyTable};

/// Owns the cart ledger for one shell session.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    ledger: CartLedger,
}

impl CartState {
    pub fn new(policies: PolicyTable) -> Self {
        CartState {
            ledger: CartLedger::new(policies),
        }
    }

    pub fn cart(&self) -> &Cart {
        self.ledger.cart()
    }

    pub fn entry(&self, id: &str) -> Option<&CartEntry> {
        self.ledger.cart().get(id)
    }

    pub fn add(&mut self, item: &CatalogItem, quantity: f64) -> Option<&CartEntry> {
        self.ledger.add_or_merge(item, quantity).get(&item.id)
    }

    pub fn increase(&mut self, id: &str) -> Option<&CartEntry> {
        self.ledger.step_quantity(id, Direction::Increase).get(id)
    }

    pub fn decrease(&mut self, id: &str) -> Option<&CartEntry> {
        self.ledger.step_quantity(id, Direction::Decrease).get(id)
    }

    /// Returns true if an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ledger.cart().len();
        self.ledger.remove(id).len() != before
    }

    pub fn clear(&mut self) {
        self.ledger.clear();
    }

    /// Numbered lines for the `cart` command.
    pub fn lines(&self) -> Vec<String> {
        self.cart()
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{:>3}. {:<30} {:>12}  [{}]", i + 1, e.name, e.quantity_label(), e.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, unit: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            category: "Grocery".to_string(),
            measure_unit: unit.to_string(),
            image_ref: None,
        }
    }

    #[test]
    fn test_add_and_step() {
        let mut state = CartState::new(PolicyTable::default());
        let apple = item("apple", "pcs");

        assert_eq!(state.add(&apple, 2.0).unwrap().quantity, 2.0);
        assert_eq!(state.add(&apple, 1.0).unwrap().quantity, 3.0);
        assert_eq!(state.decrease("apple").unwrap().quantity, 2.0);
        assert_eq!(state.increase("apple").unwrap().quantity, 3.0);
        assert_eq!(state.cart().len(), 1);
    }

    #[test]
    fn test_measured_unit_steps_fractionally() {
        let mut state = CartState::new(PolicyTable::default());
        state.add(&item("rice", "kg"), 1.0);

        assert_eq!(state.increase("rice").unwrap().quantity, 1.25);
        assert_eq!(state.decrease("rice").unwrap().quantity, 1.0);
    }

    #[test]
    fn test_remove_reports_change() {
        let mut state = CartState::new(PolicyTable::default());
        state.add(&item("a", "pcs"), 1.0);

        assert!(state.remove("a"));
        assert!(!state.remove("a"));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut state = CartState::new(PolicyTable::default());
        assert!(state.increase("ghost").is_none());
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_lines() {
        let mut state = CartState::new(PolicyTable::default());
        state.add(&item("a", "pcs"), 2.0);
        state.add(&item("b", "kg"), 0.5);

        let lines = state.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. Item a"));
        assert!(lines[0].contains("2 pcs"));
        assert!(lines[1].contains("0.5 kg"));
        assert!(lines[1].ends_with("[b]"));
    }
}
