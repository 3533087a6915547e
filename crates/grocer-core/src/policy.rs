//! # Quantity Policies
//!
//! How a cart entry's quantity moves when the user taps `+` or `-`.
//!
//! ## Policy per Unit Kind
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Unit → Kind → Policy                                  │
//! │                                                                         │
//! │  "pcs", "pack", "box" ──► Count    ──► step 1,    floor 1,    0 dp      │
//! │  "kg", "g", "l", "ml" ──► Measured ──► step 0.25, floor 0.25, 2 dp      │
//! │                                                                         │
//! │  Matching is trimmed and case-insensitive. Unknown units count.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Float Drift
//! Quantities are `f64` because fractional units are real numbers. Every
//! `+`/`-` step goes through [`QuantityPolicy::round`] and every add through
//! [`round_to`] at [`MAX_QUANTITY_PRECISION`] places. Without it,
//! `0.1 + 0.1 + 0.1` would print as `0.30000000000000004 kg` on the export.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::MAX_QUANTITY_PRECISION;

// =============================================================================
// Quantity Policy
// =============================================================================

/// Step size, floor and rounding precision for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuantityPolicy {
    /// Amount added or removed by one increase/decrease.
    pub step: f64,

    /// Lowest quantity a decrease can reach.
    pub floor: f64,

    /// Decimal places kept after each arithmetic step.
    pub precision: u32,
}

impl QuantityPolicy {
    /// Whole-unit stepping: `+1`/`-1`, never below 1.
    pub const fn whole() -> Self {
        QuantityPolicy {
            step: 1.0,
            floor: 1.0,
            precision: 0,
        }
    }

    /// Fractional stepping with the given step, floor and precision.
    pub const fn fractional(step: f64, floor: f64, precision: u32) -> Self {
        QuantityPolicy {
            step,
            floor,
            precision,
        }
    }

    /// Rounds `value` to this policy's precision.
    ///
    /// ## Example
    /// ```rust
    /// use grocer_core::policy::QuantityPolicy;
    ///
    /// let policy = QuantityPolicy::fractional(0.1, 0.1, 2);
    /// assert_eq!(policy.round(0.1 + 0.1 + 0.1), 0.3);
    /// ```
    pub fn round(&self, value: f64) -> f64 {
        round_to(value, self.precision)
    }

    /// Checks that step and floor are positive and the precision is sane.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ValidationError::MustBePositive {
                field: format!("{field}.step"),
            });
        }
        if !(self.floor.is_finite() && self.floor > 0.0) {
            return Err(ValidationError::MustBePositive {
                field: format!("{field}.floor"),
            });
        }
        if self.precision > MAX_QUANTITY_PRECISION {
            return Err(ValidationError::OutOfRange {
                field: format!("{field}.precision"),
                min: 0,
                max: MAX_QUANTITY_PRECISION as i64,
            });
        }
        Ok(())
    }
}

impl Default for QuantityPolicy {
    fn default() -> Self {
        QuantityPolicy::whole()
    }
}

/// Rounds to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places.min(MAX_QUANTITY_PRECISION) as i32);
    (value * factor).round() / factor
}

// =============================================================================
// Unit Kind
// =============================================================================

/// Whether a unit is counted in whole pieces or measured continuously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Count,
    Measured,
}

// =============================================================================
// Policy Table
// =============================================================================

/// Weight and volume units treated as measured out of the box.
pub const DEFAULT_MEASURED_UNITS: &[&str] = &[
    "kg", "g", "gram", "grams", "mg", "lb", "lbs", "oz", "l", "liter", "litre", "liters",
    "litres", "ml",
];

/// Maps measure units to their quantity policy.
///
/// ## Config Shape
/// ```toml
/// [quantity]
/// measured_units = ["kg", "g", "l", "ml"]
///
/// [quantity.count]
/// step = 1.0
/// floor = 1.0
/// precision = 0
///
/// [quantity.measured]
/// step = 0.25
/// floor = 0.25
/// precision = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTable {
    /// Units (lowercase) that use the measured policy.
    #[serde(default = "default_measured_units")]
    pub measured_units: Vec<String>,

    /// Policy for everything not listed in `measured_units`.
    #[serde(default = "QuantityPolicy::whole")]
    pub count: QuantityPolicy,

    /// Policy for weight/volume units.
    #[serde(default = "default_measured_policy")]
    pub measured: QuantityPolicy,
}

fn default_measured_units() -> Vec<String> {
    DEFAULT_MEASURED_UNITS.iter().map(|u| u.to_string()).collect()
}

fn default_measured_policy() -> QuantityPolicy {
    QuantityPolicy::fractional(0.25, 0.25, 2)
}

impl Default for PolicyTable {
    fn default() -> Self {
        PolicyTable {
            measured_units: default_measured_units(),
            count: QuantityPolicy::whole(),
            measured: default_measured_policy(),
        }
    }
}

impl PolicyTable {
    /// Classifies a measure unit.
    pub fn kind_of(&self, measure_unit: &str) -> UnitKind {
        let unit = measure_unit.trim();
        if self
            .measured_units
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(unit))
        {
            UnitKind::Measured
        } else {
            UnitKind::Count
        }
    }

    /// Returns the policy for a measure unit.
    pub fn resolve(&self, measure_unit: &str) -> QuantityPolicy {
        match self.kind_of(measure_unit) {
            UnitKind::Count => self.count,
            UnitKind::Measured => self.measured,
        }
    }

    /// Validates both policies.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.count.validate("quantity.count")?;
        self.measured.validate("quantity.measured")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.1 + 0.2, 2), 0.3);
        assert_eq!(round_to(2.675_1, 2), 2.68);
        assert_eq!(round_to(3.4, 0), 3.0);
    }

    #[test]
    fn test_repeated_fractional_steps_do_not_drift() {
        let policy = QuantityPolicy::fractional(0.1, 0.1, 2);
        let mut qty = 0.0;
        for _ in 0..30 {
            qty = policy.round(qty + policy.step);
        }
        assert_eq!(qty, 3.0);
    }

    #[test]
    fn test_kind_of_is_case_insensitive() {
        let table = PolicyTable::default();
        assert_eq!(table.kind_of("KG"), UnitKind::Measured);
        assert_eq!(table.kind_of(" liter "), UnitKind::Measured);
        assert_eq!(table.kind_of("pcs"), UnitKind::Count);
        assert_eq!(table.kind_of(""), UnitKind::Count);
    }

    #[test]
    fn test_resolve() {
        let table = PolicyTable::default();
        assert_eq!(table.resolve("pack"), QuantityPolicy::whole());
        assert_eq!(table.resolve("g").step, 0.25);
    }

    #[test]
    fn test_policy_validation() {
        assert!(QuantityPolicy::whole().validate("count").is_ok());
        assert!(QuantityPolicy::fractional(0.0, 1.0, 0)
            .validate("count")
            .is_err());
        assert!(QuantityPolicy::fractional(1.0, -1.0, 0)
            .validate("count")
            .is_err());
        assert!(QuantityPolicy::fractional(1.0, 1.0, 12)
            .validate("count")
            .is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let table: PolicyTable = serde_json::from_str(r#"{"measured_units":["kg"]}"#).unwrap();
        assert_eq!(table.count, QuantityPolicy::whole());
        assert_eq!(table.kind_of("g"), UnitKind::Count);
    }
}
