//! End-to-end router tests over an in-memory page store and the
//! heuristic-only fact-check service

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fact_check_editor::api::build_router;
use fact_check_editor::factcheck::{FactCheckService, FactCheckState};
use fact_check_editor::pages::{PageStore, PagesState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn test_app() -> Router {
    let factcheck = FactCheckState {
        service: Arc::new(FactCheckService::heuristic_only()),
    };
    let pages = PagesState {
        store: Arc::new(PageStore::in_memory().await.unwrap()),
    };

    build_router(factcheck, pages, 64 * 1024)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
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
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

#[tokio::test]
async fn test_root_and_health() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "AI Fact-Check Editor API" }));

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_metrics_endpoint_exports_text() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(std::str::from_utf8(&bytes).is_ok());
}

#[tokio::test]
async fn test_fact_check_returns_heuristic_verdict() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/fact-check",
        Some(json!({ "text": "The Earth is flat" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].as_str().unwrap().starts_with("Incorrect."));
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    assert!(!body["sources"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_fact_check_rejects_blank_text() {
    let app = test_app().await;

    for payload in [json!({ "text": "   " }), json!({ "text": "" }), json!({})] {
        let (status, body) = send(&app, Method::POST, "/api/ai/fact-check", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_page_lifecycle() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/pages",
        Some(json!({
            "title": "Notes",
            "content": [{ "type": "paragraph", "children": [{ "text": "Fire is hot" }] }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "Notes");
    assert_eq!(created["isPublic"], false);
    assert!(created["shareToken"].is_null());

    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/pages/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["content"], created["content"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/pages/{}", id),
        Some(json!({ "title": "Renamed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["content"], created["content"]);

    let (status, listed) = send(&app, Method::GET, "/api/pages?skip=0&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/pages/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Page deleted successfully");

    let (status, _) = send(&app, Method::GET, &format!("/api/pages/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_share_and_unshare() {
    let app = test_app().await;

    let (_, created) = send(&app, Method::POST, "/api/pages", Some(json!({ "title": "Public" }))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, shared) = send(&app, Method::POST, &format!("/api/pages/{}/share", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let token = shared["shareToken"].as_str().unwrap().to_string();

    let (status, page) = send(&app, Method::GET, &format!("/api/pages/shared/{}", token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["id"], id.as_str());
    assert_eq!(page["isPublic"], true);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/pages/{}/share", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &format!("/api/pages/shared/{}", token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_missing_page_operations_return_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::GET, "/api/pages/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/pages/does-not-exist",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/pages/does-not-exist/share", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
