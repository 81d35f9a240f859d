//! # Route Handlers
//!
//! The REST surface of Dhaba POS.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /                           index (route listing)               │
//! │  GET    /health                     liveness probe                      │
//! │                                                                         │
//! │  GET    /menu                       full catalog                        │
//! │  POST   /menu                       create item            201/400/409  │
//! │  GET    /menu/{item_id}             single item            200/404      │
//! │  PUT    /menu/{item_id}             partial update         200/400/404  │
//! │  DELETE /menu/{item_id}             delete item            204/404      │
//! │                                                                         │
//! │  POST   /transactions               finalize an order      201/400      │
//! │  GET    /transactions               paginated listing      200/400      │
//! │  GET    /transactions/today         today's records (+shift filter)     │
//! │  GET    /transactions/today/csv     CSV download           200/404      │
//! │  GET    /transactions/{order_number} single record         200/404      │
//! │                                                                         │
//! │  GET    /reports/daily              printable text report               │
//! │  POST   /admin/login                admin UI gate          200/401      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod menu;
pub mod reports;
pub mod transactions;

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/menu", get(menu::list_menu).post(menu::create_menu_item))
        .route(
            "/menu/{item_id}",
            get(menu::get_menu_item)
                .put(menu::update_menu_item)
                .delete(menu::delete_menu_item),
        )
        .route(
            "/transactions",
            get(transactions::list_transactions).post(transactions::finalize_transaction),
        )
        .route("/transactions/today", get(transactions::today_transactions))
        .route("/transactions/today/csv", get(transactions::today_csv))
        .route(
            "/transactions/{order_number}",
            get(transactions::get_transaction),
        )
        .route("/reports/daily", get(reports::daily_report))
        .route("/admin/login", post(admin::login))
        .with_state(state)
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "OK"
}

/// Index: lists the available endpoints, like the original server's root.
async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "name": "Dhaba POS API",
        "endpoints": [
            "GET    /menu",
            "POST   /menu",
            "GET    /menu/{item_id}",
            "PUT    /menu/{item_id}",
            "DELETE /menu/{item_id}",
            "POST   /transactions",
            "GET    /transactions",
            "GET    /transactions/today",
            "GET    /transactions/today/csv",
            "GET    /transactions/{order_number}",
            "GET    /reports/daily",
            "POST   /admin/login",
            "GET    /health",
        ],
    }))
}
