//! # Billing Calculator
//!
//! Pure derivation of bill totals from a set of order lines.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Billing Calculation                            │
//! │                                                                     │
//! │  [OrderLine] ──► subtotal = Σ line_total_cents                      │
//! │                      │                                              │
//! │                      ▼                                              │
//! │               tax = subtotal × rate   (0 when rate is 0)            │
//! │                      │                                              │
//! │                      ▼                                              │
//! │               total = subtotal + tax                                │
//! │                                                                     │
//! │  Deterministic, side-effect-free, never mutates the order.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tax rate is configuration: one deployment charges 5% (500 bps),
//! another charges nothing. Defaults to zero.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::order::OrderLine;
use crate::types::TaxRate;

/// The computed totals of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillTotals {
    /// Sum of line totals, before tax.
    pub subtotal_cents: i64,
    /// Tax on the subtotal at the configured rate.
    pub tax_cents: i64,
    /// Grand total: subtotal + tax.
    pub total_cents: i64,
}

/// Computes bill totals for a set of order lines at the given tax rate.
///
/// Pure function: same lines and rate always give the same totals.
///
/// ## Example
/// ```rust
/// use dhaba_core::billing::compute_totals;
/// use dhaba_core::order::Order;
/// use dhaba_core::types::TaxRate;
///
/// let mut order = Order::new();
/// order.add_item("A", "Thali", 19000, 3).unwrap();
///
/// let no_tax = compute_totals(order.lines(), TaxRate::zero());
/// assert_eq!(no_tax.total_cents, 57000);
///
/// let with_tax = compute_totals(order.lines(), TaxRate::from_bps(500));
/// assert_eq!(with_tax.total_cents, 59850);
/// ```
pub fn compute_totals(lines: &[OrderLine], rate: TaxRate) -> BillTotals {
    let subtotal: i64 = lines.iter().map(|l| l.line_total_cents).sum();
    let tax = Money::from_cents(subtotal).calculate_tax(rate);

    BillTotals {
        subtotal_cents: subtotal,
        tax_cents: tax.cents(),
        total_cents: subtotal + tax.cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
