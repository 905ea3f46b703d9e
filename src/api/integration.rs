//! Wiring of services from configuration
//!
//! Everything here runs once at process start; the resulting states are
//! cloned into handlers by reference-counted handle.

use axum::Router;
use std::sync::Arc;

use crate::{
    api::routes::build_router,
    config::Config,
    error::Result,
    factcheck::{FactCheckService, FactCheckState},
    pages::{PageStore, PagesState},
};

/// Initialize the fact-check service from configuration
pub fn init_factcheck_service(config: &Config) -> Result<FactCheckState> {
    let service = FactCheckService::from_config(&config.providers)?;

    Ok(FactCheckState {
        service: Arc::new(service),
    })
}

/// Initialize the page store from configuration
pub async fn init_page_store(config: &Config) -> Result<PagesState> {
    let store = PageStore::connect(&config.database).await?;

    Ok(PagesState {
        store: Arc::new(store),
    })
}

/// Build the complete application router from configuration
pub async fn build_app(config: &Config) -> Result<Router> {
    let factcheck_state = init_factcheck_service(config)?;
    let pages_state = init_page_store(config).await?;

    Ok(build_router(
        factcheck_state,
        pages_state,
        config.server.max_body_bytes,
    ))
}
