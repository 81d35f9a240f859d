//! Report handlers.
//!
//! The daily report is plain text in a 40-column thermal layout; the
//! rendering itself lives in `dhaba_core::report`.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{Duration, NaiveTime, Utc};

use dhaba_core::report;

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /reports/daily` - printable report of today's transactions.
///
/// An empty day still renders (header and footer only); the report is a
/// view, not a query that can miss.
pub async fn daily_report(State(state): State<AppState>) -> ApiResult<Response> {
    let now = Utc::now();
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);

    let records = state.db.transactions().list_between(start, end).await?;
    let text = report::render_report(&records, now);

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}
