//! Integration tests for the Tally HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::HeaderValue;
use axum_test::TestServer;
use serde_json::json;
use tally::api::{
    AppState, CartCountResponse, CartRemoveResponse, HealthResponse, UserResponse, ValueResponse,
    create_router,
};
use tally::config::ServerConfig;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Server with authentication and rate limiting disabled.
fn create_test_server() -> TestServer {
    let config = ServerConfig {
        rate_limit: 0,
        ..ServerConfig::default()
    };
    TestServer::new(create_router(AppState::new(config))).unwrap()
}

/// Server requiring `api_key`.
fn create_auth_test_server(api_key: &str) -> TestServer {
    let config = ServerConfig {
        rate_limit: 0,
        api_key: Some(api_key.to_string()),
        ..ServerConfig::default()
    };
    TestServer::new(create_router(AppState::new(config))).unwrap()
}

fn cart_json() -> serde_json::Value {
    json!([
        {"id": 1, "name": "apple", "quantity": 2},
        {"id": 2, "name": "bread", "quantity": 1},
        {"id": 3, "name": "milk", "quantity": 3}
    ])
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// AVERAGE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_average_integers() {
    let server = create_test_server();

    let response = server
        .post("/average")
        .json(&json!({"values": [1, 2, 3, 4, 5]}))
        .await;

    response.assert_status_ok();
    let body: ValueResponse = response.json();
    assert!(body.success);
    assert_eq!(body.value, Some(3.0));
    assert!(body.error.is_none());
}

#[tokio::test]
async fn test_average_fold_method() {
    let server = create_test_server();

    let response = server
        .post("/average")
        .json(&json!({"values": [1.5, 2.5, 3.5], "method": "fold"}))
        .await;

    response.assert_status_ok();
    let body: ValueResponse = response.json();
    assert_eq!(body.value, Some(2.5));
}

#[tokio::test]
async fn test_average_methods_agree() {
    let server = create_test_server();
    let values = json!([0.1, 0.2, 0.3, 1e-9, 123456.789]);

    let by_loop: ValueResponse = server
        .post("/average")
        .json(&json!({"values": values, "method": "loop"}))
        .await
        .json();
    let by_fold: ValueResponse = server
        .post("/average")
        .json(&json!({"values": values, "method": "fold"}))
        .await
        .json();

    assert_eq!(
        by_loop.value.map(f64::to_bits),
        by_fold.value.map(f64::to_bits)
    );
}

#[tokio::test]
async fn test_average_empty_rejected() {
    let server = create_test_server();

    let response = server.post("/average").json(&json!({"values": []})).await;

    response.assert_status_bad_request();
    let body: ValueResponse = response.json();
    assert!(!body.success);
    assert!(body.value.is_none());
    assert!(body.error.unwrap().contains("Invalid argument"));
}

#[tokio::test]
async fn test_average_overflow_rejected() {
    let server = create_test_server();

    for method in ["loop", "fold"] {
        let response = server
            .post("/average")
            .json(&json!({"values": [f64::MAX, f64::MAX], "method": method}))
            .await;

        response.assert_status_bad_request();
        let body: ValueResponse = response.json();
        assert!(!body.success);
        assert!(body.value.is_none());
        assert!(body.error.unwrap().contains("overflowed"));
    }
}

#[tokio::test]
async fn test_average_unknown_method_rejected() {
    let server = create_test_server();

    let response = server
        .post("/average")
        .json(&json!({"values": [1.0], "method": "median"}))
        .await;

    assert!(response.status_code().is_client_error());
}

// =============================================================================
// MSE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_mse_known_value() {
    let server = create_test_server();

    let response = server
        .post("/mse")
        .json(&json!({"actual": [0, 0], "predicted": [1, 3]}))
        .await;

    response.assert_status_ok();
    let body: ValueResponse = response.json();
    assert_eq!(body.value, Some(5.0));
}

#[tokio::test]
async fn test_mse_length_mismatch() {
    let server = create_test_server();

    let response = server
        .post("/mse")
        .json(&json!({"actual": [1, 2, 3], "predicted": [1, 2]}))
        .await;

    response.assert_status_bad_request();
    let body: ValueResponse = response.json();
    assert!(body.error.unwrap().contains("Length mismatch"));
}

#[tokio::test]
async fn test_mse_overflow_rejected() {
    let server = create_test_server();

    let response = server
        .post("/mse")
        .json(&json!({"actual": [1e200], "predicted": [-1e200]}))
        .await;

    response.assert_status_bad_request();
    let body: ValueResponse = response.json();
    assert!(!body.success);
    assert!(body.error.unwrap().contains("overflowed"));
}

// =============================================================================
// CART ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_cart_count() {
    let server = create_test_server();

    let response = server
        .post("/cart/count")
        .json(&json!({"items": cart_json()}))
        .await;

    response.assert_status_ok();
    let body: CartCountResponse = response.json();
    assert_eq!(body.total, Some(6));
}

#[tokio::test]
async fn test_cart_count_empty_is_zero() {
    let server = create_test_server();

    let response = server.post("/cart/count").json(&json!({"items": []})).await;

    response.assert_status_ok();
    let body: CartCountResponse = response.json();
    assert_eq!(body.total, Some(0));
}

#[tokio::test]
async fn test_cart_remove_present_id() {
    let server = create_test_server();

    let response = server
        .post("/cart/remove")
        .json(&json!({"items": cart_json(), "id": 2}))
        .await;

    response.assert_status_ok();
    let body: CartRemoveResponse = response.json();
    assert!(body.success);
    assert_eq!(body.removed, 1);
    let ids: Vec<u64> = body.items.iter().map(|item| item.id.0).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_cart_remove_absent_id() {
    let server = create_test_server();

    let response = server
        .post("/cart/remove")
        .json(&json!({"items": cart_json(), "id": 42}))
        .await;

    response.assert_status_ok();
    let body: CartRemoveResponse = response.json();
    assert_eq!(body.removed, 0);
    assert_eq!(body.items.len(), 3);
}

#[tokio::test]
async fn test_cart_rejects_negative_quantity() {
    let server = create_test_server();

    let response = server
        .post("/cart/count")
        .json(&json!({"items": [{"id": 1, "quantity": -1}]}))
        .await;

    assert!(response.status_code().is_client_error());
}

// =============================================================================
// USER ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_user_trimmed() {
    let server = create_test_server();

    let response = server
        .post("/user")
        .json(&json!({"first_name": "  Jane  ", "last_name": "  Smith  "}))
        .await;

    response.assert_status_ok();
    let body: UserResponse = response.json();
    let user = body.user.unwrap();
    assert_eq!(user.first_name, "Jane");
    assert_eq!(user.last_name, "Smith");
    assert_eq!(body.full_name.as_deref(), Some("Jane Smith"));
}

#[tokio::test]
async fn test_user_blank_name_rejected() {
    let server = create_test_server();

    let response = server
        .post("/user")
        .json(&json!({"first_name": "   ", "last_name": "Doe"}))
        .await;

    response.assert_status_bad_request();
}

// =============================================================================
// AUTHENTICATION MIDDLEWARE TESTS
// =============================================================================

#[tokio::test]
async fn test_auth_valid_bearer_token() {
    let api_key = "test-secret-key-12345";
    let server = create_auth_test_server(api_key);

    let response = server
        .post("/cart/count")
        .json(&json!({"items": cart_json()}))
        .add_header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", api_key)
                .parse::<HeaderValue>()
                .unwrap(),
        )
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_valid_raw_token() {
    let api_key = "test-raw-key-67890";
    let server = create_auth_test_server(api_key);

    let response = server
        .post("/average")
        .json(&json!({"values": [1]}))
        .add_header(
            axum::http::header::AUTHORIZATION,
            api_key.parse::<HeaderValue>().unwrap(),
        )
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_invalid_token_rejected() {
    let server = create_auth_test_server("correct-key");

    let response = server
        .post("/average")
        .json(&json!({"values": [1]}))
        .add_header(
            axum::http::header::AUTHORIZATION,
            "Bearer wrong-key".parse::<HeaderValue>().unwrap(),
        )
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_auth_missing_header_rejected() {
    let server = create_auth_test_server("correct-key");

    let response = server.post("/average").json(&json!({"values": [1]})).await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_auth_health_always_open() {
    let server = create_auth_test_server("correct-key");

    let response = server.get("/health").await;

    response.assert_status_ok();
}

// =============================================================================
// RATE LIMIT TESTS
// =============================================================================

#[tokio::test]
async fn test_rate_limit_exceeded() {
    let config = ServerConfig {
        rate_limit: 1,
        ..ServerConfig::default()
    };
    let server = TestServer::new(create_router(AppState::new(config))).unwrap();

    server.get("/health").await.assert_status_ok();
    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::TOO_MANY_REQUESTS);
}
