//! Page API handlers

use super::models::*;
use super::store::PageStore;
use crate::error::{Error, Result};
use crate::metrics::METRICS;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

/// Application state for page handlers
#[derive(Clone)]
pub struct PagesState {
    pub store: Arc<PageStore>,
}

fn not_found() -> Error {
    Error::NotFound("Page not found".to_string())
}

/// Record the outcome of a page operation and pass it through
fn track<T>(operation: &str, result: Result<T>) -> Result<T> {
    METRICS.record_page_request(operation, result.is_ok());
    result
}

/// Create a page
///
/// POST /api/pages
pub async fn create_page(
    State(state): State<PagesState>,
    Json(request): Json<PageCreate>,
) -> Result<Json<Page>> {
    info!("Create page request: title={}", request.title);
    track("create", state.store.create(request).await).map(Json)
}

/// List pages
///
/// GET /api/pages?skip=&limit=
pub async fn list_pages(
    State(state): State<PagesState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Page>>> {
    track("list", state.store.list(&params).await).map(Json)
}

/// Get a page by id
///
/// GET /api/pages/:id
pub async fn get_page(
    State(state): State<PagesState>,
    Path(id): Path<String>,
) -> Result<Json<Page>> {
    let page = state.store.get(&id).await.and_then(|p| p.ok_or_else(not_found));
    track("get", page).map(Json)
}

/// Get a public page by share token
///
/// GET /api/pages/shared/:token
pub async fn get_shared_page(
    State(state): State<PagesState>,
    Path(token): Path<String>,
) -> Result<Json<Page>> {
    let page = state.store.get_shared(&token).await.and_then(|p| {
        p.ok_or_else(|| Error::NotFound("Shared page not found".to_string()))
    });
    track("get_shared", page).map(Json)
}

/// Update a page
///
/// PUT /api/pages/:id
pub async fn update_page(
    State(state): State<PagesState>,
    Path(id): Path<String>,
    Json(update): Json<PageUpdate>,
) -> Result<Json<Page>> {
    let page = state
        .store
        .update(&id, update)
        .await
        .and_then(|p| p.ok_or_else(not_found));
    track("update", page).map(Json)
}

/// Delete a page
///
/// DELETE /api/pages/:id
pub async fn delete_page(
    State(state): State<PagesState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let deleted = state
        .store
        .delete(&id)
        .await
        .and_then(|found| if found { Ok(()) } else { Err(not_found()) });

    track("delete", deleted)?;
    info!("Deleted page: {}", id);
    Ok(Json(MessageResponse::new("Page deleted successfully")))
}

/// Share a page publicly
///
/// POST /api/pages/:id/share
pub async fn share_page(
    State(state): State<PagesState>,
    Path(id): Path<String>,
) -> Result<Json<ShareResponse>> {
    let token = state.store.share(&id).await.and_then(|t| t.ok_or_else(not_found));
    track("share", token).map(|share_token| Json(ShareResponse { share_token }))
}

/// Stop sharing a page
///
/// DELETE /api/pages/:id/share
pub async fn unshare_page(
    State(state): State<PagesState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let found = state
        .store
        .unshare(&id)
        .await
        .and_then(|found| if found { Ok(()) } else { Err(not_found()) });

    track("unshare", found)?;
    Ok(Json(MessageResponse::new("Page unshared successfully")))
}
