//! End-to-end HTTP flow: catalog setup, table service, payment,
//! conflict handling. Drives the real router over an in-memory
//! database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mesa_server::{BlobStore, Config, DbService, ServerState};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const SESSION: &str = "terminal-1";

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let db = DbService::new_in_memory().await.unwrap();
    let blobs = BlobStore::new(config.blobs_dir(), config.blob_secret.clone()).unwrap();
    let state = ServerState::with_pool(config, db.pool, Arc::new(blobs));
    (mesa_server::api::router(state), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-session-token", SESSION);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn table_service_over_http() {
    let (app, _dir) = test_app().await;

    // Catalog: section, table, product, priced menu item.
    let (status, section) = send(
        &app,
        "POST",
        "/api/sections",
        Some(json!({"name": "Terraza", "description": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "section_id": section["id"], "description": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["in_use"], json!(false));

    let (status, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Burger", "size": "200g", "unit": "plate", "description": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["handle"], json!("burger-200g-plate"));

    let (status, menu_item) = send(
        &app,
        "POST",
        "/api/menu-items",
        Some(json!({"product_id": product["id"], "category_id": null, "price": "9.50"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu_item["price"], json!(950));

    // Activate the table; the session now carries the order.
    let table_id = table["id"].as_i64().unwrap();
    let (status, order) = send(&app, "POST", &format!("/api/tables/{table_id}/activate"), None).await;
    assert_eq!(status, StatusCode::OK);
    let order_id = order["id"].as_i64().unwrap();

    // A second activation on the same table conflicts.
    let (status, _) = send(&app, "POST", &format!("/api/tables/{table_id}/activate"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Add 2x burger without an explicit order id (session-resolved).
    let (status, item) = send(
        &app,
        "POST",
        "/api/orders/items",
        Some(json!({"menu_item_id": menu_item["id"], "quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let item_id = item["id"].as_i64().unwrap();
    assert_eq!(item["price_at_order"], json!(950));

    let (status, item) =
        send(&app, "POST", &format!("/api/orders/items/{item_id}/deliver"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["is_delivered"], json!(true));

    // Paying before finalize is rejected.
    let (status, _) = send(&app, "POST", "/api/orders/pay", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, order) = send(&app, "POST", &format!("/api/orders/{order_id}/finalize"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["is_finished"], json!(true));

    // Table is free again, atomically with the finalize.
    let (status, table) = send(&app, "GET", &format!("/api/tables/{table_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["in_use"], json!(false));

    let (status, order) = send(&app, "POST", "/api/orders/pay", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["is_paid"], json!(true));

    // 2 x 9.50 = 19.00 invoice, fully delivered.
    let (status, detail) = send(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["invoice_total"], json!(1900));
    assert_eq!(detail["invoice_total_display"], json!("19.00"));
    assert_eq!(detail["delivered_subtotal"], json!(1900));

    // Adding to the closed order is rejected with 422.
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders/items",
        Some(json!({"order_id": order_id, "menu_item_id": menu_item["id"], "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Revenue shows up in the daily report.
    let (status, report) = send(&app, "GET", "/api/reports/revenue-by-day", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report[0]["revenue"], json!(1900));
}

#[tokio::test]
async fn dashboard_clears_session_binding() {
    let (app, _dir) = test_app().await;

    let (_, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "section_id": null, "description": null})),
    )
    .await;
    let table_id = table["id"].as_i64().unwrap();
    let (_, _order) = send(&app, "POST", &format!("/api/tables/{table_id}/activate"), None).await;

    let (status, feed) = send(&app, "GET", "/api/orders/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["active_orders"].as_array().unwrap().len(), 1);

    // Binding was cleared by the dashboard view: a session-resolved
    // command now has no order to target.
    let (status, _) = send(&app, "POST", "/api/orders/pay", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn table_delete_is_blocked_by_order_history() {
    let (app, _dir) = test_app().await;

    let (_, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(json!({"name": "T1", "section_id": null, "description": null})),
    )
    .await;
    let table_id = table["id"].as_i64().unwrap();
    let (_, order) = send(&app, "POST", &format!("/api/tables/{table_id}/activate"), None).await;
    let order_id = order["id"].as_i64().unwrap();
    send(&app, "POST", &format!("/api/orders/{order_id}/finalize"), None).await;

    // Even with the order finished, history blocks the delete.
    let (status, _) = send(&app, "DELETE", &format!("/api/tables/{table_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
