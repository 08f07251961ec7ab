//! 预订全流程集成测试
//!
//! 通过完整的 HTTP 路由（含认证中间件）走一遍市场核心流程：
//! 注册 → 登录 → 建店 → 上架套餐 → 预订 → 评论 → 评分 → 参观预约

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use market_server::core::server::build_app_with_state;
use market_server::db::DbService;
use market_server::{Config, JwtService, ServerState};
use market_server::auth::JwtConfig;

async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("failed to create temp work dir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    config
        .ensure_work_dir_structure()
        .expect("failed to create work dir structure");

    let db_path = config.database_dir().join("market.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("failed to open database");

    let jwt = Arc::new(JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-key-0123456789abcdef".to_string(),
        expiration_minutes: 60,
        issuer: "market-server".to_string(),
        audience: "market-clients".to_string(),
    }));

    let state = ServerState::new(config, db.pool, jwt);
    (build_app_with_state(state), dir)
}

/// Date `days` days from today, formatted `YYYY-MM-DD`
fn future_date(days: i64) -> String {
    (chrono::Local::now() + chrono::Duration::days(days))
        .date_naive()
        .format("%Y-%m-%d")
        .to_string()
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(app: &Router, username: &str, role: &str) -> String {
    let (status, _) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"username": username, "password": "hunter2hunter2", "role": role})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register {username} failed");

    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login {username} failed");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_marketplace_flow() {
    let (app, _dir) = test_app().await;

    let owner_token = register_and_login(&app, "nour", "owner").await;
    let customer_token = register_and_login(&app, "aya", "customer").await;

    // Owner creates their vendor profile
    let (status, vendor) = request(
        &app,
        "POST",
        "/api/vendors",
        Some(&owner_token),
        Some(json!({
            "kind": "hall",
            "name": "Grand Jasmine Hall",
            "city": "Amman",
            "description": "Garden venue with two ballrooms"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let vendor_id = vendor["id"].as_i64().unwrap();

    // A second profile for the same account is rejected
    let (status, body) = request(
        &app,
        "POST",
        "/api/vendors",
        Some(&owner_token),
        Some(json!({"kind": "hall", "name": "Another", "city": "Amman"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6003);

    // Owner profile view requires the token even though catalog GETs are public
    let (status, _) = request(&app, "GET", "/api/vendors/my", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = request(&app, "GET", "/api/vendors/my", Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], vendor_id);

    // Owner lists a package
    let (status, _) = request(
        &app,
        "POST",
        "/api/listings",
        Some(&owner_token),
        Some(json!({"name": "Gold package", "price": 2500.0, "capacity": 300})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Customers cannot manage listings
    let (status, _) = request(
        &app,
        "POST",
        "/api/listings",
        Some(&customer_token),
        Some(json!({"name": "Sneaky", "price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Anonymous catalog browse sees the vendor
    let (status, body) = request(&app, "GET", "/api/vendors?kind=hall&city=amman", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Vendor detail carries the listing
    let (status, body) = request(&app, "GET", &format!("/api/vendors/{vendor_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["listings"].as_array().unwrap().len(), 1);

    // Commenting before any booking is rejected
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/vendors/{vendor_id}/comments"),
        Some(&customer_token),
        Some(json!({"body": "can't wait"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 5501);

    // Booking requires a token
    let date = future_date(60);
    let booking_payload = json!({
        "vendor_id": vendor_id,
        "event_date": date,
        "contact_phone": "0791234567"
    });
    let (status, _) = request(&app, "POST", "/api/reservations", None, Some(booking_payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Customer books the date; price falls back to the cheapest listing
    let (status, booking) = request(
        &app,
        "POST",
        "/api/reservations",
        Some(&customer_token),
        Some(booking_payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "confirmed");
    assert_eq!(booking["price"], 2500.0);

    // The same date again conflicts
    let (status, body) = request(
        &app,
        "POST",
        "/api/reservations",
        Some(&customer_token),
        Some(booking_payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    // Availability reflects the booking
    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/reservations/availability?vendor_id={vendor_id}&date={date}"),
        Some(&customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);

    let other = future_date(61);
    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/reservations/availability?vendor_id={vendor_id}&date={other}"),
        Some(&customer_token),
        None,
    )
    .await;
    assert_eq!(body["available"], true);

    // Owner dashboard shows the booking with the customer's name
    let (status, body) = request(
        &app,
        "GET",
        "/api/reservations/vendor",
        Some(&owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["customer_name"], "aya");

    // With a confirmed booking the customer can comment and rate
    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/vendors/{vendor_id}/comments"),
        Some(&customer_token),
        Some(json!({"body": "Beautiful venue, great staff"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/vendors/{vendor_id}/comments"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["author_name"], "aya");

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/vendors/{vendor_id}/ratings"),
        Some(&customer_token),
        Some(json!({"stars": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate"], 5.0);
    assert_eq!(body["rating_count"], 1);

    // Star value outside 1..=5 is rejected
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/vendors/{vendor_id}/ratings"),
        Some(&customer_token),
        Some(json!({"stars": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5002);

    // Visit request flow: submit, then owner accepts (idempotent)
    let (status, visit) = request(
        &app,
        "POST",
        "/api/visits",
        Some(&customer_token),
        Some(json!({
            "vendor_id": vendor_id,
            "visit_date": future_date(30),
            "visit_time": "15:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(visit["accepted"], false);
    let visit_id = visit["id"].as_i64().unwrap();

    // Customers don't hold visits:accept
    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/visits/{visit_id}/accept"),
        Some(&customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/visits/{visit_id}/accept"),
            Some(&owner_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted"], true);
    }

    // Customer sees their booking and visit
    let (_, body) = request(&app, "GET", "/api/reservations/my", Some(&customer_token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["vendor_name"], "Grand Jasmine Hall");

    let (_, body) = request(&app, "GET", "/api/visits/my", Some(&customer_token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_and_auth_edges() {
    let (app, _dir) = test_app().await;

    let (status, body) = request(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = request(&app, "GET", "/health/detailed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");

    // Duplicate username
    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let (status, _) = request(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "sameer", "password": "hunter2hunter2"})),
        )
        .await;
        assert_eq!(status, expected);
    }

    // Short password
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"username": "shorty", "password": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1006);

    // Wrong password yields the unified credentials error
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "sameer", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    // Unknown user yields the identical error shape
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "ghost", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    // Garbage token
    let (status, _) = request(
        &app,
        "GET",
        "/api/reservations/my",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
