//! Fact-check API handlers

use super::models::{FactCheckRequest, FactCheckResult};
use super::service::FactCheckService;
use crate::error::{error_codes, ApiError};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};

/// Application state for fact-check handlers
#[derive(Clone)]
pub struct FactCheckState {
    pub service: Arc<FactCheckService>,
}

/// Fact-check a snippet of text
///
/// POST /api/ai/fact-check
pub async fn fact_check(
    State(state): State<FactCheckState>,
    Json(request): Json<FactCheckRequest>,
) -> Result<Json<FactCheckResult>, (StatusCode, Json<ApiError>)> {
    let text = match request.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiError::new(error_codes::VALIDATION_ERROR, "Text is required")),
            ));
        }
    };

    info!("Fact-check request: {} chars", text.len());

    // Dropped together with this handler if the client goes away, which
    // cancels any provider call still in flight
    let (_abandon_guard, abandoned) = oneshot::channel::<()>();

    let service = state.service.clone();
    let task = tokio::spawn(async move {
        service
            .fact_check_until(&text, async {
                let _ = abandoned.await;
            })
            .await
    });

    let result = match task.await {
        Ok(result) => result,
        Err(e) => {
            error!("Fact-check task failed: {}", e);
            FactCheckResult::service_unavailable()
        }
    };

    info!(
        "Fact-check result: confidence={}, sources={:?}",
        result.confidence, result.sources
    );

    Ok(Json(result))
}
