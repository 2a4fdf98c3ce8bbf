use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use bankwire_discount_core::carts::Cart;
use bankwire_discount_server::{api::app_router, build_state, config::Config, AppState};
use bankwire_discount_storage_sqlite::cart_rules::CartRuleRepository;
use bankwire_discount_storage_sqlite::carts::CartRepository;
use bankwire_discount_storage_sqlite::db;

struct TestApp {
    app: Router,
    state: Arc<AppState>,
    carts: CartRepository,
    cart_rules: CartRuleRepository,
    _tmp: TempDir,
}

fn test_config(db_path: &str, module_active: bool) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: db_path.to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_millis(30000),
        module_active,
    }
}

async fn spawn_app(module_active: bool) -> TestApp {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("test.db");
    let config = test_config(db_path.to_str().unwrap(), module_active);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);

    // Direct storage handles for seeding carts the way the order subsystem would.
    let pool = db::create_pool(db_path.to_str().unwrap()).unwrap();
    let writer = db::spawn_writer((*pool).clone());
    let carts = CartRepository::new(pool.clone(), writer.clone());
    let cart_rules = CartRuleRepository::new(pool, writer);

    TestApp {
        app,
        state,
        carts,
        cart_rules,
        _tmp: tmp,
    }
}

fn sample_cart(total: rust_decimal::Decimal) -> Cart {
    Cart {
        id: "cart-1".to_string(),
        session_id: "sess-1".to_string(),
        customer_id: Some("cust-1".to_string()),
        currency: "EUR".to_string(),
        total_with_tax: total,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn apply_request(session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/v1/discount/apply");
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }
    builder.body(Body::empty()).unwrap()
}

fn quote_request(session: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/v1/discount/quote")
        .header("x-session-id", session)
        .body(Body::empty())
        .unwrap()
}

fn settings_put(payload: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/api/v1/settings")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn apply_discount_on_fresh_cart() {
    let test = spawn_app(true).await;
    test.carts.upsert_cart(&sample_cart(dec!(200.00))).await.unwrap();

    let (status, body) = send(&test.app, apply_request(Some("sess-1"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Discount applied successfully"));
    assert_eq!(body["discount_amount"], json!(10.0));
    assert_eq!(body["discount_amount_formatted"], json!("10.00 EUR"));

    let rule = test
        .cart_rules
        .get_cart_rule_by_code("BANKWIRE_DISCOUNT_cart-1")
        .unwrap()
        .unwrap();
    assert_eq!(rule.reduction_percent, dec!(5.0));
    assert_eq!(rule.customer_id.as_deref(), Some("cust-1"));
}

#[tokio::test]
async fn second_apply_returns_stored_amount() {
    let test = spawn_app(true).await;
    test.carts.upsert_cart(&sample_cart(dec!(200.00))).await.unwrap();

    let (_, first) = send(&test.app, apply_request(Some("sess-1"))).await;
    assert_eq!(first["discount_amount"], json!(10.0));

    // The cart total changes, but the stored reduction value is answered.
    test.carts.upsert_cart(&sample_cart(dec!(300.00))).await.unwrap();

    let (status, body) = send(&test.app, apply_request(Some("sess-1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Discount already applied"));
    assert_eq!(body["discount_amount"], json!(10.0));
}

#[tokio::test]
async fn disabled_discount_creates_no_rule() {
    let test = spawn_app(true).await;
    test.carts.upsert_cart(&sample_cart(dec!(200.00))).await.unwrap();

    let (status, body) = send(&test.app, settings_put(json!({"enabled": false}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], json!(false));

    let (status, body) = send(&test.app, apply_request(Some("sess-1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Discount disabled"));

    assert!(test
        .cart_rules
        .get_cart_rule_by_code("BANKWIRE_DISCOUNT_cart-1")
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn missing_cart_is_reported() {
    let test = spawn_app(true).await;

    // Session header present, but no cart belongs to it.
    let (status, body) = send(&test.app, apply_request(Some("sess-unknown"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("No cart found"));

    // No session header at all.
    let (_, body) = send(&test.app, apply_request(None)).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("No cart found"));
}

#[tokio::test]
async fn inactive_module_is_reported() {
    let test = spawn_app(false).await;
    test.carts.upsert_cart(&sample_cart(dec!(200.00))).await.unwrap();

    let (status, body) = send(&test.app, apply_request(Some("sess-1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Module disabled"));
}

#[tokio::test]
async fn settings_update_validates_percent() {
    let test = spawn_app(true).await;

    let (status, _) = send(&test.app, settings_put(json!({"percent": "150"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&test.app, settings_put(json!({"percent": "abc"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Comma decimal separator is normalized.
    let (status, body) = send(&test.app, settings_put(json!({"percent": "7,5"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["percent"], json!(7.5));

    let (_, settings) = send(
        &test.app,
        Request::builder()
            .uri("/api/v1/settings")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(settings["percent"], json!(7.5));
    assert_eq!(settings["enabled"], json!(true));
}

#[tokio::test]
async fn rejected_update_leaves_settings_untouched() {
    let test = spawn_app(true).await;

    let (status, _) = send(
        &test.app,
        settings_put(json!({"percent": "150", "enabled": false})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Defaults still in place: neither field was written.
    let settings = test.state.settings_service.get_settings().unwrap();
    assert_eq!(settings.percent, dec!(5.0));
    assert!(settings.enabled);
}

#[tokio::test]
async fn quote_reports_current_discount() {
    let test = spawn_app(true).await;
    test.carts.upsert_cart(&sample_cart(dec!(200.00))).await.unwrap();

    let (status, body) = send(&test.app, quote_request("sess-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], json!(true));
    assert_eq!(body["percent"], json!(5.0));
    assert_eq!(body["discount_amount"], json!(10.0));
    assert_eq!(body["discount_amount_formatted"], json!("10.00 EUR"));
    assert_eq!(body["cart_total_formatted"], json!("200.00 EUR"));
}

#[tokio::test]
async fn quote_without_cart_is_not_found() {
    let test = spawn_app(true).await;

    let (status, _) = send(&test.app, quote_request("sess-unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quote_when_disabled() {
    let test = spawn_app(true).await;
    test.carts.upsert_cart(&sample_cart(dec!(200.00))).await.unwrap();

    let (_, body) = send(&test.app, settings_put(json!({"enabled": false}))).await;
    assert_eq!(body["enabled"], json!(false));

    let (status, body) = send(&test.app, quote_request("sess-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], json!(false));
    assert!(body.get("discount_amount").is_none());
}
