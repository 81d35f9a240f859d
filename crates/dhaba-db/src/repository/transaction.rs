//! # Transaction Repository
//!
//! Recording and querying finalized orders.
//!
//! ## Order Number Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Order Number Generation + Retry                        │
//! │                                                                         │
//! │  record(lines, totals, payment)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  candidate = "ORD" + YYMMDD + 3 random digits   (e.g. ORD260831042)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT transaction + item snapshots (one SQL transaction)             │
//! │       │                                                                 │
//! │       ├── ok ──────────────► return TransactionRecord                  │
//! │       │                                                                 │
//! │       └── UNIQUE(order_number) failed                                  │
//! │               │                                                         │
//! │               ▼                                                         │
//! │       retry with a fresh candidate (bounded attempts)                  │
//! │               │                                                         │
//! │               └── exhausted ──► DbError::OrderNumberExhausted          │
//! │                                                                         │
//! │  The UNIQUE index is the arbiter: no read-then-insert race window.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Item name and unit price are copied into `transaction_items` at record
//! time. Later menu edits or deletions never rewrite recorded history.

use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dhaba_core::{
    BillTotals, OrderLine, PaymentMethod, Transaction, TransactionItem, TransactionRecord,
    TransactionStatus, MAX_ORDER_NUMBER_ATTEMPTS,
};

/// All columns of `transactions`, in struct field order.
const TX_COLUMNS: &str = "id, order_number, subtotal_cents, tax_cents, total_cents, \
     payment_method, status, created_at";

/// All columns of `transaction_items`, in struct field order.
const ITEM_COLUMNS: &str = "id, transaction_id, item_id, name_snapshot, unit_price_cents, \
     quantity, line_total_cents, position";

/// Repository for finalized order operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = TransactionRepository::new(pool);
///
/// let record = repo.record(order.lines(), totals, PaymentMethod::Cash).await?;
/// let found = repo.get_by_order_number(&record.transaction.order_number).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Records a finalized order with its item snapshots.
    ///
    /// Inserts the transaction row and all item snapshots atomically.
    /// The order number is generated here, not by the caller; on a
    /// collision with an existing number the insert is retried with a
    /// fresh candidate, up to [`MAX_ORDER_NUMBER_ATTEMPTS`] times.
    ///
    /// ## Arguments
    /// * `lines` - Accumulated order lines (already merged and validated)
    /// * `totals` - Server-computed totals for those lines
    /// * `payment_method` - How the order was paid
    ///
    /// ## Returns
    /// * `Ok(TransactionRecord)` - The persisted transaction with items
    /// * `Err(DbError::OrderNumberExhausted)` - Every candidate collided
    pub async fn record(
        &self,
        lines: &[OrderLine],
        totals: BillTotals,
        payment_method: PaymentMethod,
    ) -> DbResult<TransactionRecord> {
        let now = Utc::now();

        for attempt in 1..=MAX_ORDER_NUMBER_ATTEMPTS {
            let order_number = generate_order_number(now);

            match self
                .try_insert(&order_number, lines, &totals, payment_method, now)
                .await
            {
                Ok(record) => {
                    debug!(
                        order_number = %record.transaction.order_number,
                        total_cents = record.transaction.total_cents,
                        "Recorded transaction"
                    );
                    return Ok(record);
                }
                Err(err) if err.is_unique_violation_on("order_number") => {
                    warn!(
                        order_number = %order_number,
                        attempt,
                        "Order number collision, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Err(DbError::OrderNumberExhausted {
            attempts: MAX_ORDER_NUMBER_ATTEMPTS,
        })
    }

    /// Single insert attempt with a fixed order number.
    async fn try_insert(
        &self,
        order_number: &str,
        lines: &[OrderLine],
        totals: &BillTotals,
        payment_method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> DbResult<TransactionRecord> {
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            order_number: order_number.to_string(),
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
            payment_method,
            status: TransactionStatus::Completed,
            created_at: Some(now),
        };

        let items: Vec<TransactionItem> = lines
            .iter()
            .enumerate()
            .map(|(position, line)| TransactionItem {
                id: Uuid::new_v4().to_string(),
                transaction_id: transaction.id.clone(),
                item_id: line.item_id.clone(),
                name_snapshot: line.name.clone(),
                unit_price_cents: line.unit_price_cents,
                quantity: line.quantity,
                line_total_cents: line.line_total_cents,
                position: position as i64,
            })
            .collect();

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            "INSERT INTO transactions ({TX_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ))
        .bind(&transaction.id)
        .bind(&transaction.order_number)
        .bind(transaction.subtotal_cents)
        .bind(transaction.tax_cents)
        .bind(transaction.total_cents)
        .bind(transaction.payment_method)
        .bind(transaction.status)
        .bind(transaction.created_at)
        .execute(&mut *tx)
        .await?;

        for item in &items {
            sqlx::query(&format!(
                "INSERT INTO transaction_items ({ITEM_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ))
            .bind(&item.id)
            .bind(&item.transaction_id)
            .bind(&item.item_id)
            .bind(&item.name_snapshot)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.line_total_cents)
            .bind(item.position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(TransactionRecord { transaction, items })
    }

    /// Gets a transaction (with items) by its order number.
    ///
    /// ## Returns
    /// * `Ok(Some(TransactionRecord))` - Transaction found
    /// * `Ok(None)` - No such order number
    pub async fn get_by_order_number(
        &self,
        order_number: &str,
    ) -> DbResult<Option<TransactionRecord>> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TX_COLUMNS} FROM transactions WHERE order_number = ?1"
        ))
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;

        match transaction {
            Some(transaction) => {
                let items = self.items_for(&transaction.id).await?;
                Ok(Some(TransactionRecord { transaction, items }))
            }
            None => Ok(None),
        }
    }

    /// Lists a page of transactions, newest first.
    ///
    /// `page` is 1-based. Returns the page of records plus the total row
    /// count, from which the caller derives `total_pages`.
    pub async fn list_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> DbResult<(Vec<TransactionRecord>, i64)> {
        let offset = (page.saturating_sub(1) as i64) * page_size as i64;

        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TX_COLUMNS} FROM transactions \
             ORDER BY created_at DESC, order_number DESC \
             LIMIT ?1 OFFSET ?2"
        ))
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            let items = self.items_for(&transaction.id).await?;
            records.push(TransactionRecord { transaction, items });
        }

        Ok((records, total))
    }

    /// Lists transactions recorded in `[start, end)`, oldest first.
    ///
    /// Used by the daily report and CSV export, which read chronologically.
    /// Rows with a NULL `created_at` never match a range filter; they only
    /// appear in the unfiltered listing.
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<TransactionRecord>> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TX_COLUMNS} FROM transactions \
             WHERE created_at >= ?1 AND created_at < ?2 \
             ORDER BY created_at ASC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            let items = self.items_for(&transaction.id).await?;
            records.push(TransactionRecord { transaction, items });
        }

        Ok(records)
    }

    /// Counts recorded transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetches the item snapshots of one transaction, in insertion order.
    async fn items_for(&self, transaction_id: &str) -> DbResult<Vec<TransactionItem>> {
        let items = sqlx::query_as::<_, TransactionItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM transaction_items \
             WHERE transaction_id = ?1 ORDER BY position ASC"
        ))
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

/// Generates an order number candidate: `ORD` + YYMMDD + 3 random digits.
///
/// 1,000 numbers per day is plenty for a single restaurant; the UNIQUE
/// index plus bounded retry in [`TransactionRepository::record`] handles
/// the rare collision.
fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("ORD{}{:03}", now.format("%y%m%d"), suffix)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use dhaba_core::{compute_totals, Order, TaxRate};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_order() -> Order {
        let mut order = Order::new();
        order
            .add_item("ITEM001", "Butter Chicken", 25000, 2)
            .unwrap();
        order.add_item("ITEM002", "Naan", 3000, 3).unwrap();
        order
    }

    #[tokio::test]
    async fn test_record_persists_transaction_and_items() {
        let db = test_db().await;
        let repo = db.transactions();

        let order = sample_order();
        let totals = compute_totals(order.lines(), TaxRate::from_bps(500));
        let record = repo
            .record(order.lines(), totals, PaymentMethod::Cash)
            .await
            .unwrap();

        assert_eq!(record.transaction.subtotal_cents, 59000);
        assert_eq!(record.transaction.tax_cents, 2950);
        assert_eq!(record.transaction.total_cents, 61950);
        assert_eq!(record.items.len(), 2);
        assert_eq!(record.items[0].name_snapshot, "Butter Chicken");
        assert_eq!(record.items[0].position, 0);
        assert_eq!(record.items[1].position, 1);
        assert!(record.transaction.created_at.is_some());
    }

    #[tokio::test]
    async fn test_order_number_format() {
        let db = test_db().await;
        let repo = db.transactions();

        let order = sample_order();
        let totals = compute_totals(order.lines(), TaxRate::zero());
        let record = repo
            .record(order.lines(), totals, PaymentMethod::Upi)
            .await
            .unwrap();

        let number = &record.transaction.order_number;
        // ORD + YYMMDD + 3 digits = 12 chars
        assert_eq!(number.len(), 12, "got: {number}");
        assert!(number.starts_with("ORD"));
        assert!(number[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_get_by_order_number_round_trip() {
        let db = test_db().await;
        let repo = db.transactions();

        let order = sample_order();
        let totals = compute_totals(order.lines(), TaxRate::zero());
        let record = repo
            .record(order.lines(), totals, PaymentMethod::Card)
            .await
            .unwrap();

        let found = repo
            .get_by_order_number(&record.transaction.order_number)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.transaction.id, record.transaction.id);
        assert_eq!(found.items.len(), 2);
        assert_eq!(found.transaction.payment_method, PaymentMethod::Card);
        assert_eq!(found.transaction.status, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn test_get_unknown_order_number_is_none() {
        let db = test_db().await;
        let repo = db.transactions();

        let found = repo.get_by_order_number("ORD000000000").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_page_counts_and_slices() {
        let db = test_db().await;
        let repo = db.transactions();

        for _ in 0..3 {
            let order = sample_order();
            let totals = compute_totals(order.lines(), TaxRate::zero());
            repo.record(order.lines(), totals, PaymentMethod::Cash)
                .await
                .unwrap();
        }

        let (first, total) = repo.list_page(1, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(first.len(), 2);

        let (second, _) = repo.list_page(2, 2).await.unwrap();
        assert_eq!(second.len(), 1);

        let (beyond, _) = repo.list_page(3, 2).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_list_between_filters_by_instant() {
        let db = test_db().await;
        let repo = db.transactions();

        let order = sample_order();
        let totals = compute_totals(order.lines(), TaxRate::zero());
        repo.record(order.lines(), totals, PaymentMethod::Cash)
            .await
            .unwrap();

        let now = Utc::now();
        let today = repo
            .list_between(now - chrono::Duration::hours(1), now + chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(today.len(), 1);

        let tomorrow = repo
            .list_between(now + chrono::Duration::days(1), now + chrono::Duration::days(2))
            .await
            .unwrap();
        assert!(tomorrow.is_empty());
    }
}
