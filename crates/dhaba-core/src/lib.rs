//! # dhaba-core: Pure Business Logic for Dhaba POS
//!
//! This crate is the **heart** of Dhaba POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Dhaba POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                    REST API (apps/server)                     │ │
//! │  │   /menu ──► /transactions ──► /reports ──► /admin/login       │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │              ★ dhaba-core (THIS CRATE) ★                      │ │
//! │  │                                                               │ │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ │ │
//! │  │  │  types  │ │  money  │ │  order  │ │ billing │ │ report  │ │ │
//! │  │  │MenuItem │ │  Money  │ │  Order  │ │ totals  │ │ thermal │ │ │
//! │  │  │ Txn ... │ │ TaxCalc │ │  lines  │ │ + tax   │ │ + CSV   │ │ │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘ │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                  dhaba-db (Database Layer)                    │ │
//! │  │          SQLite queries, migrations, repositories             │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Transaction, TaxRate, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - The order accumulator (merge-on-add line items)
//! - [`billing`] - Pure bill totals derivation (subtotal/tax/total)
//! - [`report`] - Printable and CSV report rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod money;
pub mod order;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dhaba_core::Money` instead of
// `use dhaba_core::money::Money`

pub use billing::{compute_totals, BillTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single order.
///
/// ## Business Reason
/// Prevents runaway orders and keeps receipts printable.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum accumulated quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum unit price in cents (₹1,00,000.00).
///
/// ## Business Reason
/// No dish costs a lakh; the cap also keeps every line total
/// (`MAX_PRICE_CENTS × MAX_LINE_QUANTITY`) and order subtotal comfortably
/// inside i64, so cent arithmetic never overflows.
pub const MAX_PRICE_CENTS: i64 = 10_000_000;

/// Maximum page number accepted for paginated listings.
///
/// Page offsets are computed in 32-bit page space; anything larger than
/// this is rejected up front instead of being truncated.
pub const MAX_PAGE: i64 = u32::MAX as i64;

/// Bounded attempts at generating a unique order number before the
/// recorder gives up with a distinct error.
pub const MAX_ORDER_NUMBER_ATTEMPTS: u32 = 5;
