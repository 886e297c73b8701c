//! Order lifecycle over HTTP
//!
//! Drives the full router with in-process requests against a real database
//! in a temporary working directory. No network, no mocks.

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use order_server::db::models::{MenuItem, OptionChoice, OptionGroup, SelectionType};
use order_server::{Config, ServerState, api};

fn test_state(work_dir: &std::path::Path) -> ServerState {
    let config = Config::with_overrides(work_dir.to_string_lossy(), 0);
    ServerState::initialize(config).unwrap()
}

fn seed_menu(state: &ServerState, shop_id: &str) {
    let burger = MenuItem {
        id: "burger".to_string(),
        shop_id: shop_id.to_string(),
        name: "Burger".to_string(),
        base_price: 50.0,
        discount_percent: 0.0,
        option_groups: vec![],
        available: true,
    };
    let salad = MenuItem {
        id: "salad".to_string(),
        shop_id: shop_id.to_string(),
        name: "Salad".to_string(),
        base_price: 30.0,
        discount_percent: 20.0,
        option_groups: vec![],
        available: true,
    };
    let coffee = MenuItem {
        id: "coffee".to_string(),
        shop_id: shop_id.to_string(),
        name: "Coffee".to_string(),
        base_price: 3.0,
        discount_percent: 0.0,
        option_groups: vec![OptionGroup {
            id: "size".to_string(),
            name: "Size".to_string(),
            selection: SelectionType::Single,
            required: true,
            choices: vec![
                OptionChoice {
                    id: "regular".to_string(),
                    name: "Regular".to_string(),
                    price_delta: 0.0,
                },
                OptionChoice {
                    id: "large".to_string(),
                    name: "Large".to_string(),
                    price_delta: 0.8,
                },
            ],
        }],
        available: true,
    };
    for item in [&burger, &salad, &coffee] {
        state.storage.put_menu_item(item).unwrap();
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn checkout_body() -> Value {
    json!({
        "items": [
            { "menu_item_id": "burger", "quantity": 2, "options": [] },
            { "menu_item_id": "salad", "quantity": 1, "options": [] }
        ],
        "table_number": 7
    })
}

// ==================== Tests ====================

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = api::create_router(test_state(dir.path()));

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_full_order_flow_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    seed_menu(&state, "shop-a");
    let app = api::create_router(state);

    // Create: server-side pricing, 2 x 50 + 1 x 24 = 124
    let (status, order) = send(
        &app,
        Method::POST,
        "/api/shops/shop-a/orders",
        Some(checkout_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["total_amount"], 124.0);
    let id = order["id"].as_str().unwrap().to_string();

    // Walk the happy path up to the kitchen hand-off
    for next in ["CONFIRMED", "IN_PROGRESS"] {
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/shops/shop-a/orders/{id}/status"),
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], next);
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/shops/shop-a/orders/{id}/send-to-kitchen"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_sent_to_kitchen"], true);

    // Repeated hand-off is rejected
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/shops/shop-a/orders/{id}/send-to-kitchen"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Kitchen queue shows the dispatched order
    let (status, queue) = send(&app, Method::GET, "/api/shops/shop-a/kitchen/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue.as_array().unwrap().len(), 1);
    assert_eq!(queue[0]["order_id"], id.as_str());
    assert_eq!(queue[0]["items"][0]["name"], "Burger");

    // Cancellation window is closed once preparation may have begun
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/shops/shop-a/orders/{id}/status"),
        Some(json!({ "status": "CANCELLED" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The kitchen finishes the order
    for next in ["PREPARING", "READY", "DELIVERED"] {
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/shops/shop-a/kitchen/orders/{id}/status"),
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], next);
    }

    // Delivered orders leave the kitchen queue
    let (_, queue) = send(&app, Method::GET, "/api/shops/shop-a/kitchen/orders", None).await;
    assert!(queue.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_errors_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    seed_menu(&state, "shop-a");
    let app = api::create_router(state);

    // Unknown menu item
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/shops/shop-a/orders",
        Some(json!({ "items": [{ "menu_item_id": "sushi", "quantity": 1, "options": [] }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");

    // Missing required option group
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/shops/shop-a/orders",
        Some(json!({ "items": [{ "menu_item_id": "coffee", "quantity": 1, "options": [] }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Unknown order
    let (status, _) = send(&app, Method::GET, "/api/shops/shop-a/orders/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Skipping states
    let (_, order) = send(
        &app,
        Method::POST,
        "/api/shops/shop-a/orders",
        Some(checkout_body()),
    )
    .await;
    let id = order["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/shops/shop-a/orders/{id}/status"),
        Some(json!({ "status": "READY" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_shop_isolation_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    seed_menu(&state, "shop-a");
    let app = api::create_router(state);

    let (_, order) = send(
        &app,
        Method::POST,
        "/api/shops/shop-a/orders",
        Some(checkout_body()),
    )
    .await;
    let id = order["id"].as_str().unwrap();

    // Another shop cannot read or mutate the order
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/shops/shop-b/orders/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/shops/shop-b/orders/{id}/status"),
        Some(json!({ "status": "CONFIRMED" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listing) = send(&app, Method::GET, "/api/shops/shop-b/orders", None).await;
    assert_eq!(listing["total"], 0);
}

#[tokio::test]
async fn test_listing_pagination_and_filter() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    seed_menu(&state, "shop-a");
    let app = api::create_router(state);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let (_, order) = send(
            &app,
            Method::POST,
            "/api/shops/shop-a/orders",
            Some(checkout_body()),
        )
        .await;
        ids.push(order["id"].as_str().unwrap().to_string());
    }
    // Confirm one of them
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/shops/shop-a/orders/{}/status", ids[0]),
        Some(json!({ "status": "CONFIRMED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, listing) = send(
        &app,
        Method::GET,
        "/api/shops/shop-a/orders?page=1&limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 3);
    assert_eq!(listing["total_pages"], 2);
    assert_eq!(listing["items"].as_array().unwrap().len(), 2);

    let (_, pending) = send(
        &app,
        Method::GET,
        "/api/shops/shop-a/orders?status=PENDING",
        None,
    )
    .await;
    assert_eq!(pending["total"], 2);

    let (_, confirmed) = send(
        &app,
        Method::GET,
        "/api/shops/shop-a/orders?status=CONFIRMED",
        None,
    )
    .await;
    assert_eq!(confirmed["total"], 1);
    assert_eq!(confirmed["items"][0]["id"], ids[0].as_str());
}
