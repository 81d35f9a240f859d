//! Transaction handlers: finalize, listing, today's view, CSV export.
//!
//! ## Finalize Flow (server-side recomputation)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /transactions  {items: [{item_id, quantity}], payment_method}    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Resolve each item_id against the menu catalog (price + name)          │
//! │       │          unknown id → 400, totals never trusted from client    │
//! │       ▼                                                                 │
//! │  Order accumulator (merges duplicate item_id at the same price)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_totals(lines, configured tax rate)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TransactionRepository::record  (atomic insert + order number retry)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  201 {order_number, subtotal_cents, tax_cents, total_cents, items}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use dhaba_core::{
    compute_totals, report, validation, CoreError, Order, PaymentMethod, TransactionRecord,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// One requested line: the client sends ids and quantities, nothing else.
#[derive(Debug, Deserialize)]
pub struct FinalizeLine {
    pub item_id: String,
    pub quantity: i64,
}

/// Body of `POST /transactions`.
#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    pub items: Vec<FinalizeLine>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Pagination query for `GET /transactions`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Paginated listing envelope (shape from the original API).
#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub items: Vec<TransactionRecord>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

/// Query for `GET /transactions/today`.
#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    /// Informal time bucket: morning (<12), afternoon (12-17), evening (17+).
    pub shift: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /transactions` - finalize an order.
pub async fn finalize_transaction(
    State(state): State<AppState>,
    Json(request): Json<FinalizeRequest>,
) -> ApiResult<(StatusCode, Json<TransactionRecord>)> {
    if request.items.is_empty() {
        return Err(CoreError::EmptyOrder.into());
    }

    let menu = state.db.menu();
    let mut order = Order::new();

    for line in &request.items {
        // Price and name come from the catalog, never from the client.
        // An unknown id is the client's mistake, hence 400 rather than 404.
        let item = menu.get_by_item_id(&line.item_id).await?.ok_or_else(|| {
            ApiError::validation(format!("Unknown menu item: {}", line.item_id))
        })?;

        order
            .add_item(&item.item_id, &item.name, item.price_cents, line.quantity)
            .map_err(ApiError::from)?;
    }

    let totals = compute_totals(order.lines(), state.tax_rate());
    let record = state
        .db
        .transactions()
        .record(order.lines(), totals, request.payment_method)
        .await?;

    info!(
        order_number = %record.transaction.order_number,
        total_cents = record.transaction.total_cents,
        "Transaction finalized"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /transactions?page=&limit=` - paginated listing, newest first.
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<TransactionPage>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    validation::validate_pagination(page, limit).map_err(CoreError::from)?;

    let (items, total_count) = state
        .db
        .transactions()
        .list_page(page as u32, limit as u32)
        .await?;

    // Ceiling division; zero rows means zero pages
    let total_pages = (total_count + limit - 1) / limit;

    Ok(Json(TransactionPage {
        items,
        current_page: page,
        total_pages,
        total_count,
    }))
}

/// `GET /transactions/{order_number}` - a single record with items.
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> ApiResult<Json<TransactionRecord>> {
    let record = state
        .db
        .transactions()
        .get_by_order_number(&order_number)
        .await?
        .ok_or_else(|| ApiError::from(CoreError::TransactionNotFound(order_number)))?;

    Ok(Json(record))
}

/// `GET /transactions/today?shift=` - today's records, oldest first.
pub async fn today_transactions(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> ApiResult<Json<Vec<TransactionRecord>>> {
    let records = fetch_today(&state).await?;
    let records = apply_shift_filter(records, query.shift.as_deref())?;

    Ok(Json(records))
}

/// `GET /transactions/today/csv` - CSV download of today's records.
///
/// 404 when nothing was recorded today, matching the original exporter.
pub async fn today_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let records = fetch_today(&state).await?;
    if records.is_empty() {
        return Err(ApiError::not_found("No transactions recorded today"));
    }

    let csv = report::render_csv(&records).map_err(ApiError::from)?;
    let filename = format!(
        "transactions_{}.csv",
        Utc::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

// =============================================================================
// Helpers
// =============================================================================

/// Fetches transactions recorded in the current UTC day.
async fn fetch_today(state: &AppState) -> ApiResult<Vec<TransactionRecord>> {
    let start = Utc::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();
    let end = start + Duration::days(1);

    let records = state.db.transactions().list_between(start, end).await?;
    Ok(records)
}

/// Filters records by the informal shift buckets of the original system.
///
/// morning: before 12:00, afternoon: 12:00-16:59, evening: 17:00 onwards.
/// Records without a timestamp never match a bucket.
fn apply_shift_filter(
    records: Vec<TransactionRecord>,
    shift: Option<&str>,
) -> ApiResult<Vec<TransactionRecord>> {
    let shift = match shift {
        Some(shift) => shift,
        None => return Ok(records),
    };

    let in_bucket: fn(DateTime<Utc>) -> bool = match shift {
        "morning" => |ts| ts.hour() < 12,
        "afternoon" => |ts| (12..17).contains(&ts.hour()),
        "evening" => |ts| ts.hour() >= 17,
        other => {
            return Err(ApiError::validation(format!(
                "Unknown shift '{other}' (expected morning, afternoon or evening)"
            )))
        }
    };

    Ok(records
        .into_iter()
        .filter(|r| r.transaction.created_at.map(in_bucket).unwrap_or(false))
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dhaba_core::{PaymentMethod, Transaction, TransactionStatus};

    fn record_at(hour: u32) -> TransactionRecord {
        TransactionRecord {
            transaction: Transaction {
                id: format!("id-{hour}"),
                order_number: format!("ORD26083{hour:04}"),
                subtotal_cents: 1000,
                tax_cents: 0,
                total_cents: 1000,
                payment_method: PaymentMethod::Cash,
                status: TransactionStatus::Completed,
                created_at: Some(Utc.with_ymd_and_hms(2026, 8, 31, hour, 30, 0).unwrap()),
            },
            items: vec![],
        }
    }

    #[test]
    fn test_shift_buckets() {
        let records = vec![record_at(9), record_at(13), record_at(19)];

        let morning = apply_shift_filter(records.clone(), Some("morning")).unwrap();
        assert_eq!(morning.len(), 1);
        assert_eq!(morning[0].transaction.created_at.unwrap().hour(), 9);

        let afternoon = apply_shift_filter(records.clone(), Some("afternoon")).unwrap();
        assert_eq!(afternoon.len(), 1);

        let evening = apply_shift_filter(records.clone(), Some("evening")).unwrap();
        assert_eq!(evening.len(), 1);

        let all = apply_shift_filter(records, None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_unknown_shift_is_rejected() {
        let err = apply_shift_filter(vec![], Some("midnight")).unwrap_err();
        assert!(err.message.contains("midnight"));
    }

    #[test]
    fn test_missing_timestamp_never_matches_a_shift() {
        let mut record = record_at(9);
        record.transaction.created_at = None;

        let filtered = apply_shift_filter(vec![record], Some("morning")).unwrap();
        assert!(filtered.is_empty());
    }
}
