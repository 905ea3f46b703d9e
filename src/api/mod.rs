//! HTTP API for pages and fact-checks

pub mod handlers;
pub mod integration;
pub mod routes;

pub use integration::{build_app, init_factcheck_service, init_page_store};
pub use routes::{build_factcheck_routes, build_pages_routes, build_router};
