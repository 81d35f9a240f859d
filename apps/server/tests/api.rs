//! Integration tests for the REST surface.
//!
//! Each test builds the full router against an isolated in-memory
//! database and drives it with `tower::ServiceExt::oneshot`, so the
//! whole stack (extractors, handlers, repositories, error mapping) is
//! exercised without binding a socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use dhaba_db::{Database, DbConfig};
use dhaba_server::{routes, AppState, ServerConfig};

// =============================================================================
// Test Harness
// =============================================================================

fn test_config(tax_rate_bps: u32) -> ServerConfig {
    ServerConfig {
        port: 0,
        database_path: ":memory:".to_string(),
        tax_rate_bps,
        admin_username: "admin".to_string(),
        admin_password: "secret".to_string(),
    }
}

async fn test_app(tax_rate_bps: u32) -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    routes::router(AppState::new(db, test_config(tax_rate_bps)))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn seed_item(app: &Router, item_id: &str, name: &str, price_cents: i64) {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/menu",
            json!({"item_id": item_id, "name": name, "price_cents": price_cents}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn finalize(app: &Router, items: Value) -> (StatusCode, Value) {
    send(
        app,
        json_request("POST", "/transactions", json!({"items": items})),
    )
    .await
}

// =============================================================================
// Health & Index
// =============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app(0).await;
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn index_lists_endpoints() {
    let app = test_app(0).await;
    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"].as_array().unwrap().len() > 5);
}

// =============================================================================
// Menu Catalog
// =============================================================================

#[tokio::test]
async fn menu_crud_round_trip() {
    let app = test_app(0).await;

    // Create
    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/menu",
            json!({
                "item_id": "ITEM001",
                "name": "Butter Chicken",
                "price_cents": 25000,
                "category": "Main Course",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["item_id"], "ITEM001");
    assert_eq!(created["price_cents"], 25000);

    // Read
    let (status, fetched) = send(&app, get("/menu/ITEM001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Butter Chicken");

    // Partial update: only the price changes
    let (status, updated) = send(
        &app,
        json_request("PUT", "/menu/ITEM001", json!({"price_cents": 26000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price_cents"], 26000);
    assert_eq!(updated["name"], "Butter Chicken");
    assert_eq!(updated["category"], "Main Course");

    // Delete
    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/menu/ITEM001")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get("/menu/ITEM001")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn menu_duplicate_item_id_is_conflict() {
    let app = test_app(0).await;
    seed_item(&app, "ITEM001", "Naan", 3000).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/menu",
            json!({"item_id": "ITEM001", "name": "Garlic Naan", "price_cents": 4000}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn menu_rejects_out_of_range_price() {
    let app = test_app(0).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/menu",
            json!({"item_id": "ITEM001", "name": "Naan", "price_cents": -1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // A near-i64::MAX price must be rejected here, not overflow later
    // when a transaction multiplies it by a quantity.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/menu",
            json!({"item_id": "ITEM001", "name": "Naan", "price_cents": i64::MAX / 2 + 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn menu_generates_item_id_when_omitted() {
    let app = test_app(0).await;

    let (status, created) = send(
        &app,
        json_request("POST", "/menu", json!({"name": "Naan", "price_cents": 3000})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created["item_id"].as_str().unwrap().starts_with("ITEM"));
}

#[tokio::test]
async fn menu_empty_update_is_rejected() {
    let app = test_app(0).await;
    seed_item(&app, "ITEM001", "Naan", 3000).await;

    let (status, _) = send(&app, json_request("PUT", "/menu/ITEM001", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Transactions
// =============================================================================

#[tokio::test]
async fn finalize_merges_lines_and_computes_totals() {
    // 5% tax deployment
    let app = test_app(500).await;
    seed_item(&app, "ITEM010", "Thali", 19000).await;

    // The same item twice merges into one line of quantity 3
    let (status, record) = finalize(
        &app,
        json!([
            {"item_id": "ITEM010", "quantity": 2},
            {"item_id": "ITEM010", "quantity": 1},
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["subtotal_cents"], 57000);
    assert_eq!(record["tax_cents"], 2850);
    assert_eq!(record["total_cents"], 59850);

    let items = record["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["line_total_cents"], 57000);

    // ORD + YYMMDD + 3 digits
    let order_number = record["order_number"].as_str().unwrap();
    assert_eq!(order_number.len(), 12);
    assert!(order_number.starts_with("ORD"));
}

#[tokio::test]
async fn finalize_without_tax_totals_match_subtotal() {
    let app = test_app(0).await;
    seed_item(&app, "ITEM010", "Thali", 19000).await;

    let (status, record) =
        finalize(&app, json!([{"item_id": "ITEM010", "quantity": 3}])).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["tax_cents"], 0);
    assert_eq!(record["total_cents"], 57000);
}

#[tokio::test]
async fn finalize_empty_order_is_rejected() {
    let app = test_app(0).await;

    let (status, body) = finalize(&app, json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn finalize_unknown_item_is_rejected() {
    let app = test_app(0).await;

    let (status, body) =
        finalize(&app, json!([{"item_id": "ITEM404", "quantity": 1}])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("ITEM404"));
}

#[tokio::test]
async fn finalize_zero_quantity_is_rejected() {
    let app = test_app(0).await;
    seed_item(&app, "ITEM010", "Thali", 19000).await;

    let (status, _) = finalize(&app, json!([{"item_id": "ITEM010", "quantity": 0}])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transaction_lookup_by_order_number() {
    let app = test_app(0).await;
    seed_item(&app, "ITEM010", "Thali", 19000).await;

    let (_, record) = finalize(&app, json!([{"item_id": "ITEM010", "quantity": 1}])).await;
    let order_number = record["order_number"].as_str().unwrap();

    let (status, fetched) = send(&app, get(&format!("/transactions/{order_number}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["order_number"], *order_number);
    assert_eq!(fetched["items"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, get("/transactions/ORD000000000")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn transaction_listing_paginates() {
    let app = test_app(0).await;
    seed_item(&app, "ITEM010", "Thali", 19000).await;

    for _ in 0..3 {
        let (status, _) =
            finalize(&app, json!([{"item_id": "ITEM010", "quantity": 1}])).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app, get("/transactions?page=1&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["current_page"], 1);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["total_count"], 3);

    let (status, page) = send(&app, get("/transactions?page=2&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn transaction_listing_rejects_bad_pagination() {
    let app = test_app(0).await;

    let (status, _) = send(&app, get("/transactions?page=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/transactions?limit=1000")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Pages beyond 32-bit range are rejected, not silently truncated
    let (status, _) = send(&app, get("/transactions?page=4294967296")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn todays_transactions_and_csv_export() {
    let app = test_app(0).await;

    // Empty day: listing is empty, CSV is a 404 like the original exporter
    let (status, body) = send(&app, get("/transactions/today")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = send(&app, get("/transactions/today/csv")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    seed_item(&app, "ITEM010", "Thali", 19000).await;
    finalize(&app, json!([{"item_id": "ITEM010", "quantity": 1}])).await;

    let (status, body) = send(&app, get("/transactions/today")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(get("/transactions/today/csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("attachment"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("Order Number,Timestamp,Items"));
    assert_eq!(csv.lines().count(), 2); // header + one row
}

#[tokio::test]
async fn todays_transactions_unknown_shift_is_rejected() {
    let app = test_app(0).await;

    let (status, body) = send(&app, get("/transactions/today?shift=midnight")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn daily_report_renders_plain_text() {
    let app = test_app(0).await;
    seed_item(&app, "ITEM010", "Thali", 19000).await;
    let (_, record) = finalize(&app, json!([{"item_id": "ITEM010", "quantity": 2}])).await;
    let order_number = record["order_number"].as_str().unwrap().to_string();

    let response = app.clone().oneshot(get("/reports/daily")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("AARKAY VAISHNO DHABA"));
    assert!(text.contains(&format!("Order #{order_number}")));
    assert!(text.contains("2x Thali"));
}

#[tokio::test]
async fn daily_report_renders_even_when_empty() {
    let app = test_app(0).await;

    let response = app.clone().oneshot(get("/reports/daily")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Transaction Report"));
    assert!(text.contains("Thank you for your business!"));
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn admin_login_checks_credentials() {
    let app = test_app(0).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/admin/login",
            json!({"username": "admin", "password": "secret"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/admin/login",
            json!({"username": "admin", "password": "wrong"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}
