//! # Domain Types
//!
//! Core domain types used throughout Dhaba POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌──────────────────┐  ┌──────────────────┐  │
//! │  │    MenuItem     │   │   Transaction    │  │ TransactionItem  │  │
//! │  │  ─────────────  │   │  ──────────────  │  │  ──────────────  │  │
//! │  │  id (UUID)      │   │  id (UUID)       │  │  id (UUID)       │  │
//! │  │  item_id (biz)  │   │  order_number    │  │  item_id (snap)  │  │
//! │  │  name           │   │  subtotal_cents  │  │  name_snapshot   │  │
//! │  │  price_cents    │   │  tax_cents       │  │  unit_price ×qty │  │
//! │  │  category       │   │  total_cents     │  │  line_total      │  │
//! │  └─────────────────┘   └──────────────────┘  └──────────────────┘  │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌──────────────────┐  ┌──────────────────┐  │
//! │  │    TaxRate      │   │  PaymentMethod   │  │TransactionStatus │  │
//! │  │  bps (u32)      │   │  Cash/Card/Upi   │  │  Completed       │  │
//! │  │  500 = 5%       │   └──────────────────┘  └──────────────────┘  │
//! │  └─────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (`item_id`, `order_number`) - human-readable, what the
//!   REST surface and receipts expose

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. 500 bps = 5%, the rate one deployment
/// of this system charges; the other charges none. The rate is therefore
/// configuration, never a hardcoded business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// An item on the menu, available for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, unique within the catalog (e.g., "ITEM001").
    pub item_id: String,

    /// Display name shown during order entry and on receipts.
    pub name: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Optional menu section (e.g., "Main Course", "Beverages").
    pub category: Option<String>,

    /// Optional longer description for the admin panel.
    pub description: Option<String>,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a menu item.
///
/// `item_id` is optional: when omitted the catalog generates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub item_id: Option<String>,
    pub name: String,
    pub price_cents: i64,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Partial update for a menu item.
///
/// Fields left as `None` are not changed; there is no way to null out a
/// category or description through this patch (matching the original
/// admin panel, which always resubmits the fields it shows).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl MenuItemPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price_cents.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a finalized order was paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment (the default at the counter).
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// UPI / QR-code payment.
    Upi,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

/// Human-readable label, used by reports and the CSV export.
impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Transaction Status
// =============================================================================

/// The status of a recorded transaction.
///
/// Transactions are immutable once recorded, so today there is only one
/// state. Stored as TEXT so a future refund flow only needs a new variant.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Order was finalized and paid.
    Completed,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Completed
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// An immutable finalized order record.
///
/// ## Invariants
/// - `total_cents == subtotal_cents + tax_cents`
/// - `subtotal_cents == Σ` of the item snapshots' `line_total_cents`
/// - `order_number` is unique and assigned exactly once, at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable business identifier: `ORD` + YYMMDD + 3 random digits.
    pub order_number: String,

    /// Sum of all line totals, before tax.
    pub subtotal_cents: i64,

    /// Tax charged on the subtotal (zero when no tax is configured).
    pub tax_cents: i64,

    /// Grand total: subtotal + tax.
    pub total_cents: i64,

    /// How the order was paid.
    pub payment_method: PaymentMethod,

    /// Lifecycle status.
    pub status: TransactionStatus,

    /// Server-assigned creation instant.
    ///
    /// Nullable in storage: rows imported from the legacy store may lack
    /// one. The recorder always writes `Some`; readers (reports) must
    /// tolerate `None`.
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Transaction Item
// =============================================================================

/// A line item snapshot inside a transaction.
///
/// Uses the snapshot pattern: name and unit price are frozen at finalize
/// time, so later menu edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionItem {
    pub id: String,
    pub transaction_id: String,
    /// Menu item business id at time of sale (frozen).
    pub item_id: String,
    /// Item name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Quantity ordered. Always positive.
    pub quantity: i64,
    /// Line total (unit_price × quantity, accumulated through merges).
    pub line_total_cents: i64,
    /// Zero-based insertion order within the transaction.
    pub position: i64,
}

// =============================================================================
// Transaction Record
// =============================================================================

/// A transaction together with its item snapshots, in insertion order.
///
/// This is what `POST /transactions` returns, what `GET` by id returns,
/// and what the report formatter consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub items: Vec<TransactionItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
        assert!(!rate.is_zero());
        assert!(TaxRate::default().is_zero());
    }

    #[test]
    fn test_payment_method_default() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn test_payment_method_serde_names() {
        let json = serde_json::to_string(&PaymentMethod::Upi).unwrap();
        assert_eq!(json, "\"upi\"");
        let back: PaymentMethod = serde_json::from_str("\"cash\"").unwrap();
        assert_eq!(back, PaymentMethod::Cash);
    }

    #[test]
    fn test_menu_item_patch_is_empty() {
        assert!(MenuItemPatch::default().is_empty());
        let patch = MenuItemPatch {
            price_cents: Some(25000),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
