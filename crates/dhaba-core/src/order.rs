//! # Order Accumulator
//!
//! The in-memory order being built during order entry, before finalize.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Order Accumulator Operations                    │
//! │                                                                     │
//! │  Caller Action            Operation              State Change       │
//! │  ─────────────            ─────────              ────────────       │
//! │                                                                     │
//! │  Pick menu item ────────► add_item() ──────────► merge or append    │
//! │                                                                     │
//! │  Remove a line ─────────► remove_line() ───────► retain (no-op if   │
//! │                                                  already gone)      │
//! │                                                                     │
//! │  Finalize/cancel ───────► clear() ─────────────► lines.clear()      │
//! │                                                                     │
//! │  Show totals ───────────► subtotal_cents() ────► (read only)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Merge Rule
//! Lines are keyed by the `(item_id, unit_price_cents)` pair, NOT by item
//! id alone: if an item's price was edited between two adds, the order
//! keeps two lines at the two observed prices. Merging adds
//! `unit_price × quantity` onto the stored `line_total_cents` rather than
//! recomputing from scratch, so the merged line total is always the exact
//! sum of the contributions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::{validate_quantity, validate_unit_price_cents};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

// =============================================================================
// Order Line
// =============================================================================

/// One (item, price, quantity) entry in an in-progress order.
///
/// Transient: lines only exist inside an [`Order`] until finalize, at
/// which point they are snapshotted into `TransactionItem`s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Identifier for this line within its order (UUID v4).
    pub line_id: String,

    /// Menu item business id.
    pub item_id: String,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen). Part of the merge
    /// key together with `item_id`.
    pub unit_price_cents: i64,

    /// Accumulated quantity. Always positive.
    pub quantity: i64,

    /// Accumulated line total in cents.
    pub line_total_cents: i64,
}

// =============================================================================
// Order
// =============================================================================

/// The order accumulator: all lines of one in-progress order.
///
/// ## Invariants
/// - At most one line per `(item_id, unit_price_cents)` pair
/// - Insertion order is preserved (Vec-backed)
/// - `quantity >= 1` and `unit_price_cents >= 0` on every line
/// - Scoped to a single session; never shared across requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    lines: Vec<OrderLine>,
}

impl Order {
    /// Creates a new empty order.
    pub fn new() -> Self {
        Order { lines: Vec::new() }
    }

    /// Adds an item to the order, merging into an existing line when the
    /// `(item_id, unit_price_cents)` pair matches.
    ///
    /// ## Validation
    /// - `quantity` must be >= 1 (and <= MAX_LINE_QUANTITY)
    /// - `unit_price_cents` must be in 0..=MAX_PRICE_CENTS
    ///
    /// On any validation failure the order is left unchanged.
    ///
    /// ## Returns
    /// The id of the created or merged-into line.
    pub fn add_item(
        &mut self,
        item_id: &str,
        name: &str,
        unit_price_cents: i64,
        quantity: i64,
    ) -> CoreResult<String> {
        validate_quantity(quantity)?;
        validate_unit_price_cents(unit_price_cents)?;
        if item_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "item_id".to_string(),
            }
            .into());
        }

        // Merge into an existing line at the same price
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.item_id == item_id && l.unit_price_cents == unit_price_cents)
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            // Incremental, never recomputed: keeps the total equal to the
            // exact sum of every contribution.
            line.line_total_cents += unit_price_cents * quantity;
            return Ok(line.line_id.clone());
        }

        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        let line = OrderLine {
            line_id: Uuid::new_v4().to_string(),
            item_id: item_id.to_string(),
            name: name.to_string(),
            unit_price_cents,
            quantity,
            line_total_cents: unit_price_cents * quantity,
        };
        let line_id = line.line_id.clone();
        self.lines.push(line);
        Ok(line_id)
    }

    /// Removes the line with the given id.
    ///
    /// Removing an absent line is a no-op, not an error.
    pub fn remove_line(&mut self, line_id: &str) {
        self.lines.retain(|l| l.line_id != line_id);
    }

    /// Empties all lines. Called after a successful finalize or a cancel.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line totals, in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_cents).sum()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
