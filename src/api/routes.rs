//! Router assembly

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::factcheck::{self, FactCheckState};
use crate::pages::{handlers as page_handlers, PagesState};

/// Build fact-check API routes
pub fn build_factcheck_routes(state: FactCheckState) -> Router {
    Router::new()
        .route("/api/ai/fact-check", post(factcheck::fact_check))
        .with_state(state)
}

/// Build page API routes
pub fn build_pages_routes(state: PagesState) -> Router {
    Router::new()
        .route(
            "/api/pages",
            post(page_handlers::create_page).get(page_handlers::list_pages),
        )
        .route("/api/pages/shared/:token", get(page_handlers::get_shared_page))
        .route(
            "/api/pages/:id",
            get(page_handlers::get_page)
                .put(page_handlers::update_page)
                .delete(page_handlers::delete_page),
        )
        .route(
            "/api/pages/:id/share",
            post(page_handlers::share_page).delete(page_handlers::unshare_page),
        )
        .with_state(state)
}

/// Build the complete router with shared middleware
pub fn build_router(
    factcheck_state: FactCheckState,
    pages_state: PagesState,
    max_body_bytes: usize,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .merge(build_factcheck_routes(factcheck_state))
        .merge(build_pages_routes(pages_state))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
