//! HTTP API integration tests
//!
//! Drives the full router over in-memory SQLite with the keyword-only
//! analyzer, so no network is involved.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use drift_api::auth::JwtKeys;
use drift_api::services::EmotionAnalyzer;
use drift_api::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

/// Router over a fresh in-memory database
async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    drift_api::db::init_schema(&pool).await.unwrap();

    let state = AppState::new(
        pool,
        EmotionAnalyzer::keyword_only(),
        JwtKeys::new("test-secret"),
    );
    build_router(state)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
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

/// Register a user and return their access token
async fn register(app: &Router, username: &str, email: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": email,
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn banner_and_health_respond() {
    let app = test_app().await;

    let (status, body) = send_json(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Emotional Drift Monitoring API");
    assert_eq!(body["status"], "running");

    let (status, body) = send_json(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "drift-api");
}

#[tokio::test]
async fn register_issues_token_and_user() {
    let app = test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn register_validates_input() {
    let app = test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"username": "alice", "email": "", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"username": "alice", "email": "alice@example.com", "password": "short"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app().await;
    register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "email": "different@example.com",
            "password": "password123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn login_round_trips_and_rejects_bad_credentials() {
    let app = test_app().await;
    register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "wrongpass"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn entries_require_a_valid_token() {
    let app = test_app().await;

    let (status, body) = send_json(&app, "GET", "/api/entries", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Access token required");

    let (status, body) =
        send_json(&app, "GET", "/api/entries", Some("not-a-real-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn create_entry_persists_and_returns_analysis() {
    let app = test_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/entries",
        Some(&token),
        Some(json!({"content": "I am so happy and excited today!"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["content"], "I am so happy and excited today!");
    assert_eq!(body["entry"]["emotion"]["emotion"], "joy");
    assert_eq!(body["entry"]["emotion"]["confidence"], 1.0);
    assert_eq!(body["entry"]["emotion"]["joy_score"], 1.0);
    assert_eq!(body["entry"]["emotion"]["sadness_score"], 0.0);
}

#[tokio::test]
async fn create_entry_rejects_blank_content() {
    let app = test_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/entries",
        Some(&token),
        Some(json!({"content": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Content cannot be empty");
}

#[tokio::test]
async fn listing_returns_own_entries_newest_first() {
    let app = test_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    for content in ["first entry, feeling great", "second entry, feeling sad"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/entries",
            Some(&token),
            Some(json!({"content": content})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send_json(&app, "GET", "/api/entries", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["entries"][0]["content"], "second entry, feeling sad");
    assert_eq!(body["entries"][0]["emotion"], "sadness");
    assert_eq!(body["entries"][1]["emotion"], "joy");

    let (status, body) =
        send_json(&app, "GET", "/api/entries?limit=1&offset=1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["entries"][0]["content"], "first entry, feeling great");
}

#[tokio::test]
async fn entry_lookup_is_scoped_to_its_owner() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let bob = register(&app, "bob", "bob@example.com").await;

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/entries",
        Some(&alice),
        Some(json!({"content": "private thoughts, feeling worried"})),
    )
    .await;
    let entry_id = body["entry"]["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "GET",
        &format!("/api/entries/{}", entry_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["emotion"], "fear");

    let (status, _) = send_json(
        &app,
        "GET",
        &format!("/api/entries/{}", entry_id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_aggregate_persisted_entries() {
    let app = test_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    for content in ["feeling happy", "feeling happy again", "feeling sad"] {
        send_json(
            &app,
            "POST",
            "/api/entries",
            Some(&token),
            Some(json!({"content": content})),
        )
        .await;
    }

    let (status, body) = send_json(&app, "GET", "/api/analytics/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_entries"], 3);
    assert_eq!(body["dominant_emotion"]["emotion"], "joy");
    assert_eq!(body["dominant_emotion"]["count"], 2);
    assert_eq!(body["distribution"].as_array().unwrap().len(), 2);

    let (status, body) =
        send_json(&app, "GET", "/api/analytics/timeline?days=7", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let timeline = body["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 1, "all entries land in today's bucket");
    assert_eq!(timeline[0]["entry_count"], 3);

    let avg_joy = timeline[0]["avg_joy"].as_f64().unwrap();
    assert!((avg_joy - 2.0 / 3.0).abs() < 1e-6);
}

#[tokio::test]
async fn analytics_for_a_fresh_user_are_empty() {
    let app = test_app().await;
    let token = register(&app, "alice", "alice@example.com").await;

    let (status, body) = send_json(&app, "GET", "/api/analytics/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_entries"], 0);
    assert!(body["dominant_emotion"].is_null());
    assert!(body["distribution"].as_array().unwrap().is_empty());
}
