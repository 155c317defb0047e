//! End-to-end tests driving the full router in-process.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use scaffold_api::api::{create_router, AppState};

fn app() -> Router {
    create_router(AppState::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn root_returns_welcome_metadata() {
    let (status, body) = get(app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["docs"], "/docs");
    assert!(body["message"].as_str().unwrap().starts_with("Welcome"));
}

#[tokio::test]
async fn health_is_healthy_with_fresh_timestamp() {
    let before = Utc::now();
    let (status, body) = get(app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["version"], "1.0.0");

    let timestamp: DateTime<Utc> = body["timestamp"].as_str().unwrap().parse().unwrap();
    assert!(timestamp >= before);
}

#[tokio::test]
async fn status_is_operational() {
    let (status, body) = get(app(), "/api/v1/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn list_users_returns_fixed_names() {
    let (status, body) = get(app(), "/api/v1/users/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["shuvam", "dutta"]));

    let (_, with_query) = get(app(), "/api/v1/users/?q=ignored&skip=5").await;
    assert_eq!(with_query, json!(["shuvam", "dutta"]));
}

#[tokio::test]
async fn get_user_echoes_integer_id() {
    let (status, body) = get(app(), "/api/v1/users/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user_id": 42 }));

    let (_, negative) = get(app(), "/api/v1/users/-7").await;
    assert_eq!(negative, json!({ "user_id": -7 }));
}

#[tokio::test]
async fn get_user_rejects_non_integer_id() {
    let (status, body) = get(app(), "/api/v1/users/abc").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], true);
    assert_eq!(body["status_code"], 422);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn search_echoes_query() {
    let (status, body) = get(app(), "/api/v1/users/search/?q=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "q": "alice" }));

    let (_, absent) = get(app(), "/api/v1/users/search/").await;
    assert_eq!(absent, json!({ "q": null }));
}

#[tokio::test]
async fn items_default_window_returns_all() {
    let (status, body) = get(app(), "/api/v1/users/items/?skip=0&limit=100").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "items": [
                { "item_name": "Foo" },
                { "item_name": "Bar" },
                { "item_name": "Baz" }
            ]
        })
    );
}

#[tokio::test]
async fn items_window_selects_second() {
    let (_, body) = get(app(), "/api/v1/users/items/?skip=1&limit=1").await;
    assert_eq!(body, json!({ "items": [{ "item_name": "Bar" }] }));
}

#[tokio::test]
async fn items_skip_beyond_bounds_is_empty() {
    let (status, body) = get(app(), "/api/v1/users/items/?skip=10&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [] }));
}

#[tokio::test]
async fn items_include_non_empty_query() {
    let (_, body) = get(app(), "/api/v1/users/items/?q=foo&limit=1").await;
    assert_eq!(body, json!({ "q": "foo", "items": [{ "item_name": "Foo" }] }));

    let (_, empty_q) = get(app(), "/api/v1/users/items/?q=&limit=1").await;
    assert_eq!(empty_q, json!({ "items": [{ "item_name": "Foo" }] }));
}

#[tokio::test]
async fn items_reject_malformed_limit() {
    let (status, body) = get(app(), "/api/v1/users/items/?limit=ten").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Validation error");
}

#[tokio::test]
async fn unknown_route_has_json_error_body() {
    let (status, body) = get(app(), "/does/not/exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
    assert_eq!(body["detail"], "/does/not/exist");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = get(app(), "/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/users/items/"].is_object());
}

#[tokio::test]
async fn repeated_calls_are_idempotent() {
    let router = app();
    for uri in [
        "/",
        "/api/v1/users/",
        "/api/v1/users/3",
        "/api/v1/users/search/?q=x",
        "/api/v1/users/items/?skip=1&limit=2",
    ] {
        let (_, first) = get(router.clone(), uri).await;
        let (_, second) = get(router.clone(), uri).await;
        assert_eq!(first, second, "{uri}");
    }
}

#[tokio::test]
async fn items_window_saturates_oversized_integers() {
    let (status, body) = get(app(), "/api/v1/users/items/?limit=99999999999999999999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let (status, body) = get(app(), "/api/v1/users/items/?skip=99999999999999999999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [] }));

    let (status, body) = get(app(), "/api/v1/users/items/?skip=-99999999999999999999&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [] }));
}

#[tokio::test]
async fn get_user_accepts_full_i64_range_only() {
    let (status, body) = get(app(), "/api/v1/users/9223372036854775807").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user_id": i64::MAX }));

    let (status, _) = get(app(), "/api/v1/users/99999999999999999999").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn slashless_search_is_a_user_id_validation_error() {
    let (status, body) = get(app(), "/api/v1/users/search").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Cannot parse `search` to a `i64`");
}
