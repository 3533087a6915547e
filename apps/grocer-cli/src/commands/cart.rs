//! # Cart Commands
//!
//! `add`, `inc`, `dec`, `rm`, `cart` and `clear`.
//!
//! Items are added from the last applied catalog listing, so `list` or
//! `search` must run first. Unknown ids are reported without touching the
//! cart.

use tracing::debug;

use crate::error::{CommandError, ErrorCode};
use crate::state::Session;

/// Quantity used when `add` is given none.
pub const DEFAULT_ADD_QUANTITY: f64 = 1.0;

/// `add <id> [qty]`
pub async fn add(session: &mut Session, id: &str, quantity: Option<f64>) -> Result<String, CommandError> {
    let quantity = quantity.unwrap_or(DEFAULT_ADD_QUANTITY);
    if !(quantity.is_finite() && quantity > 0.0) {
        return Err(CommandError::validation("Quantity must be a positive number"));
    }

    let item = session
        .catalog
        .find(id)
        .await
        .ok_or_else(|| CommandError::not_found("Catalog item", id))?;

    debug!(id, quantity, "Adding to cart");
    session
        .cart
        .add(&item, quantity)
        .map(|entry| format!("Added {}: now {}", entry.name, entry.quantity_label()))
        .ok_or_else(|| CommandError::new(ErrorCode::Internal, format!("{} was not added", item.name)))
}

/// `inc <id>`
pub fn increase(session: &mut Session, id: &str) -> Result<String, CommandError> {
    session
        .cart
        .increase(id)
        .map(|e| format!("{}: {}", e.name, e.quantity_label()))
        .ok_or_else(|| CommandError::not_found("Cart entry", id))
}

/// `dec <id>`. Stops at the entry's floor; use `rm` to delete.
pub fn decrease(session: &mut Session, id: &str) -> Result<String, CommandError> {
    session
        .cart
        .decrease(id)
        .map(|e| format!("{}: {}", e.name, e.quantity_label()))
        .ok_or_else(|| CommandError::not_found("Cart entry", id))
}

/// `rm <id>`. An id that is not in the cart is a no-op, not a failure.
pub fn remove(session: &mut Session, id: &str) -> String {
    let name = session.cart.entry(id).map(|e| e.name.clone());
    if session.cart.remove(id) {
        format!("Removed {}", name.unwrap_or_else(|| id.to_string()))
    } else {
        format!("{} is not in the cart", id)
    }
}

/// `cart`
pub fn show(session: &Session) -> String {
    let cart = session.cart.cart();
    if cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = session.cart.lines().join("\n");
    out.push_str(&format!(
        "\n{} entries, {} units in total",
        cart.len(),
        cart.total_quantity()
    ));
    out
}

/// `clear`
pub fn clear(session: &mut Session) -> String {
    let count = session.cart.cart().len();
    session.cart.clear();
    format!("Cleared {} entries", count)
}
