//! # Report Formatter
//!
//! Renders persisted transactions into printable and exportable layouts.
//!
//! ## Layouts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Report Formatter                              │
//! │                                                                     │
//! │  [TransactionRecord] ──► render_report() ──► 40-column thermal      │
//! │                     │                        text (header, dashed   │
//! │                     │                        groups, footer)        │
//! │                     │                                               │
//! │                     └──► render_csv() ─────► one CSV row per        │
//! │                                              transaction            │
//! │                                                                     │
//! │  Pure presentation: no persistence side effects.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timestamp Tolerance
//! Rows imported from the legacy store may lack a timestamp. A missing or
//! unrenderable timestamp displays as "N/A"; it never fails the report.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TransactionRecord;

// =============================================================================
// Constants
// =============================================================================

/// Report column width. Matches a 384-dot thermal printer at standard font.
pub const REPORT_WIDTH: usize = 40;

/// Displayed when a transaction has no usable timestamp.
const MISSING_TIMESTAMP: &str = "N/A";

/// Report header lines (restaurant identity, as printed on receipts).
const HEADER_LINES: [&str; 2] = ["AARKAY VAISHNO DHABA", "NAKODAR ROAD, JALANDHAR"];

// =============================================================================
// Printable Report
// =============================================================================

/// Renders transactions as a printable fixed-width report.
///
/// Groups by transaction: each group shows the order number, timestamp,
/// item lines, and a per-transaction total, separated by dashed rules.
/// `generated_at` is the report-level timestamp (passed in so rendering
/// stays deterministic and testable).
pub fn render_report(records: &[TransactionRecord], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    // Report header
    for line in HEADER_LINES {
        out.push_str(&center(line));
        out.push('\n');
    }
    out.push_str(&center("Transaction Report"));
    out.push('\n');
    out.push_str(&center(&format_timestamp(Some(generated_at))));
    out.push('\n');
    out.push_str(&rule('-'));
    out.push('\n');

    // One group per transaction
    for record in records {
        let tx = &record.transaction;

        out.push_str(&format!("Order #{}\n", tx.order_number));
        out.push_str(&format_timestamp(tx.created_at));
        out.push('\n');

        for item in &record.items {
            let label = format!("{}x {}", item.quantity, item.name_snapshot);
            let amount = Money::from_cents(item.line_total_cents).to_string();
            out.push_str(&justify(&label, &amount));
            out.push('\n');
        }

        out.push_str(&rule('.'));
        out.push('\n');
        out.push_str(&justify(
            "Total",
            &Money::from_cents(tx.total_cents).to_string(),
        ));
        out.push('\n');
        out.push_str(&rule('-'));
        out.push('\n');
    }

    // Report footer
    out.push_str(&center("Thank you for your business!"));
    out.push('\n');

    out
}

// =============================================================================
// CSV Export
// =============================================================================

/// Renders transactions as CSV, one row per transaction.
///
/// Columns follow the daily export: order number, timestamp, a combined
/// items column ("name (₹price) xN, ..."), total amount, payment method.
pub fn render_csv(records: &[TransactionRecord]) -> CoreResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "Order Number",
            "Timestamp",
            "Items",
            "Total Amount",
            "Payment Method",
        ])
        .map_err(|e| CoreError::Render(e.to_string()))?;

    for record in records {
        let tx = &record.transaction;

        let items = record
            .items
            .iter()
            .map(|i| {
                format!(
                    "{} ({}) x{}",
                    i.name_snapshot,
                    Money::from_cents(i.unit_price_cents),
                    i.quantity
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        writer
            .write_record([
                &tx.order_number,
                &format_timestamp(tx.created_at),
                &items,
                &Money::from_cents(tx.total_cents).to_string(),
                &tx.payment_method.to_string(),
            ])
            .map_err(|e| CoreError::Render(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Render(e.to_string()))
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Formats a timestamp for display, substituting "N/A" when absent.
fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%d/%m/%Y %I:%M %p").to_string(),
        None => MISSING_TIMESTAMP.to_string(),
    }
}

/// Centers a line within REPORT_WIDTH columns.
///
/// Width is measured in chars, not bytes: amounts contain "₹".
fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= REPORT_WIDTH {
        return text.to_string();
    }
    let pad = (REPORT_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Left-justifies `label` and right-justifies `amount` on one line.
fn justify(label: &str, amount: &str) -> String {
    let used = label.chars().count() + amount.chars().count();
    if used >= REPORT_WIDTH {
        // Overlong item names: fall back to a single separating space.
        return format!("{} {}", label, amount);
    }
    format!("{}{}{}", label, " ".repeat(REPORT_WIDTH - used), amount)
}

/// A full-width rule of the given character.
fn rule(c: char) -> String {
    std::iter::repeat(c).take(REPORT_WIDTH).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethod, Transaction, TransactionItem, TransactionStatus};
    use chrono::TimeZone;

    fn record(
        order_number: &str,
        created_at: Option<DateTime<Utc>>,
        items: &[(&str, i64, i64)],
    ) -> TransactionRecord {
        let tx_id = format!("uuid-{}", order_number);
        let items: Vec<TransactionItem> = items
            .iter()
            .enumerate()
            .map(|(pos, (name, price, qty))| TransactionItem {
                id: format!("{}-{}", tx_id, pos),
                transaction_id: tx_id.clone(),
                item_id: format!("ITEM{:03}", pos),
                name_snapshot: name.to_string(),
                unit_price_cents: *price,
                quantity: *qty,
                line_total_cents: price * qty,
                position: pos as i64,
            })
            .collect();
        let subtotal: i64 = items.iter().map(|i| i.line_total_cents).sum();

        TransactionRecord {
            transaction: Transaction {
                id: tx_id,
                order_number: order_number.to_string(),
                subtotal_cents: subtotal,
                tax_cents: 0,
                total_cents: subtotal,
                payment_method: PaymentMethod::Cash,
                status: TransactionStatus::Completed,
                created_at,
            },
            items,
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_report_groups_and_totals() {
        let records = vec![
            record(
                "ORD260830001",
                Some(at(2026, 8, 30, 13, 10)),
                &[("Butter Chicken", 25000, 2), ("Naan", 3000, 3)],
            ),
            record("ORD260830002", Some(at(2026, 8, 30, 14, 5)), &[("Masala Chai", 2000, 1)]),
        ];

        let report = render_report(&records, at(2026, 8, 30, 18, 0));

        assert!(report.contains("AARKAY VAISHNO DHABA"));
        assert!(report.contains("Transaction Report"));
        assert!(report.contains("Order #ORD260830001"));
        assert!(report.contains("Order #ORD260830002"));
        assert!(report.contains("2x Butter Chicken"));
        assert!(report.contains("₹590.00")); // 2×250 + 3×30
        assert!(report.contains("Thank you for your business!"));
    }

    #[test]
    fn test_report_missing_timestamp_renders_na() {
        let records = vec![record("ORD260830003", None, &[("Naan", 3000, 1)])];
        let report = render_report(&records, at(2026, 8, 30, 18, 0));

        // The report must not fail; the group shows N/A instead.
        assert!(report.contains("Order #ORD260830003"));
        assert!(report.contains("N/A"));
    }

    #[test]
    fn test_report_lines_fit_width() {
        let records = vec![record(
            "ORD260830004",
            Some(at(2026, 8, 30, 12, 0)),
            &[("Butter Chicken", 25000, 2)],
        )];
        let report = render_report(&records, at(2026, 8, 30, 18, 0));

        for line in report.lines() {
            assert!(
                line.chars().count() <= REPORT_WIDTH,
                "line exceeds width: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_csv_one_row_per_transaction() {
        let records = vec![
            record("ORD260830001", Some(at(2026, 8, 30, 13, 10)), &[("Naan", 3000, 2)]),
            record("ORD260830002", None, &[("Masala Chai", 2000, 1)]),
        ];

        let csv = render_csv(&records).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Order Number,Timestamp,Items"));

        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("ORD260830001"));
        // Items column contains a comma, so it must be quoted... unless
        // there is only one item. Either way the N/A fallback applies.
        assert!(rows[1].contains("N/A"));
    }

    #[test]
    fn test_csv_quotes_multi_item_column() {
        let records = vec![record(
            "ORD260830005",
            Some(at(2026, 8, 30, 13, 10)),
            &[("Naan", 3000, 2), ("Masala Chai", 2000, 1)],
        )];

        let csv = render_csv(&records).unwrap();
        let row = csv.lines().nth(1).unwrap();
        // The joined items column contains ", " and must arrive quoted.
        assert!(row.contains("\"Naan (₹30.00) x2, Masala Chai (₹20.00) x1\""));
    }
}
