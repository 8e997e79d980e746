//! End-to-end redemption flow against the in-process router
//!
//! Drives the real application router (auth middleware included) the way a
//! cashier terminal would: login for a session cookie, then validate,
//! reserve, redeem and reset.

use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use portal_server::core::build_router;
use portal_server::{Config, ServerState};

fn test_state(work_dir: &std::path::Path) -> ServerState {
    let mut config = Config::with_overrides(work_dir.to_string_lossy().to_string(), 0);
    config.codes_inline = Some("A1,A2".to_string());
    config.codes_file = None;
    config.cashier_id = "test".to_string();
    config.cashier_pin = "1234".to_string();
    ServerState::initialize(&config).expect("state init")
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, Option<String>, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, set_cookie, json)
}

/// Login and return the session cookie pair (`session=<token>`)
async fn login(app: &Router, cashier_id: &str, pin: &str) -> String {
    let (status, set_cookie, json) = send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "cashier_id": cashier_id, "pin": pin })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);

    let set_cookie = set_cookie.expect("session cookie set");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn test_full_redemption_flow() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(dir.path());
    let app = build_router(state);

    // Requests without a session are rejected
    let (status, _, _) = send_json(
        &app,
        "POST",
        "/api/vouchers/validate",
        None,
        Some(serde_json::json!({ "code": "A1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let cookie = login(&app, "test", "1234").await;

    // A2 is loaded and active
    let (status, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/validate",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exists"], true);
    assert_eq!(json["redeemed"], false);

    // Unknown code never errors
    let (status, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/validate",
        Some(&cookie),
        Some(serde_json::json!({ "code": "NOPE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exists"], false);

    // First redeem performs the transition, the retry is idempotent
    let (_, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/redeem",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A1" })),
    )
    .await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["already"], false);

    let (_, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/redeem",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A1" })),
    )
    .await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["already"], true);

    // The processed count reflects the single real redemption
    let (status, _, json) = send_json(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cashier_id"], "test");
    assert_eq!(json["processed_count"], 1);

    // The ledger on disk holds the code exactly once
    let ledger: Vec<String> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("redeemed.json")).expect("ledger file"),
    )
    .expect("ledger json");
    assert_eq!(ledger, vec!["A1".to_string()]);
}

#[tokio::test]
async fn test_reservation_conflict_between_cashiers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(dir.path());
    let app = build_router(state.clone());

    let cookie = login(&app, "test", "1234").await;

    // A second terminal's session, minted directly by the JWT service and
    // passed as a bearer token
    let other_token = state
        .jwt_service
        .generate_token("other-cashier")
        .expect("token");

    let request = Request::builder()
        .method("POST")
        .uri("/api/vouchers/reserve")
        .header(header::AUTHORIZATION, format!("Bearer {}", other_token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "code": "A2" }).to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(json["reserved"], true);
    assert_eq!(json["reserved_by"], "other-cashier");

    // The logged-in cashier now sees the conflict, with the holder named
    let (status, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/reserve",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exists"], true);
    assert_eq!(json["reserved"], true);
    assert_eq!(json["reserved_by"], "other-cashier");

    // The conflict is advisory only: redemption still settles the race
    let (_, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/redeem",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A2" })),
    )
    .await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["already"], false);
}

#[tokio::test]
async fn test_reset_clears_redemptions_and_counters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(dir.path());
    let app = build_router(state);

    let cookie = login(&app, "test", "1234").await;

    let (_, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/redeem",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A1" })),
    )
    .await;
    assert_eq!(json["ok"], true);

    let (status, _, json) = send_json(&app, "POST", "/api/vouchers/reset", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);

    // Previously redeemed codes validate as active again
    let (_, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/validate",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A1" })),
    )
    .await;
    assert_eq!(json["exists"], true);
    assert_eq!(json["redeemed"], false);

    // Counters are gone too
    let (_, _, json) = send_json(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(json["processed_count"], 0);

    // And the ledger file is an empty array
    let ledger: Vec<String> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("redeemed.json")).expect("ledger file"),
    )
    .expect("ledger json");
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = test_state(dir.path());
    let app = build_router(state);

    let (status, set_cookie, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "cashier_id": "test", "pin": "9999" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(set_cookie.is_none());
}

#[tokio::test]
async fn test_restart_reconciles_from_ledger() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let state = test_state(dir.path());
        let app = build_router(state);
        let cookie = login(&app, "test", "1234").await;
        let (_, _, json) = send_json(
            &app,
            "POST",
            "/api/vouchers/redeem",
            Some(&cookie),
            Some(serde_json::json!({ "code": "A1" })),
        )
        .await;
        assert_eq!(json["ok"], true);
    }

    // "Restart": fresh state over the same work dir
    let state = test_state(dir.path());
    let app = build_router(state);
    let cookie = login(&app, "test", "1234").await;

    let (_, _, json) = send_json(
        &app,
        "POST",
        "/api/vouchers/validate",
        Some(&cookie),
        Some(serde_json::json!({ "code": "A1" })),
    )
    .await;
    assert_eq!(json["exists"], true);
    assert_eq!(json["redeemed"], true);
}
