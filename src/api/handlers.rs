//! Service-level handlers

use crate::metrics::METRICS;
use axum::{http::header, response::IntoResponse, Json};
use serde_json::{json, Value};

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Fact-Check Editor API" }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        METRICS.export_prometheus(),
    )
}
