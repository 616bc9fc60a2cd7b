//! HTTP surface for the submit form: text extraction, draft validation and
//! redemption checks.

pub mod config;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use voucherdrop_core::ProfanityFilter;
use voucherdrop_extract::Extractor;

pub use handlers::*;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
    pub moderation: Arc<ProfanityFilter>,
}

impl AppState {
    pub fn new(extractor: Extractor, moderation: ProfanityFilter) -> Self {
        Self {
            extractor: Arc::new(extractor),
            moderation: Arc::new(moderation),
        }
    }
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/categories", get(list_categories))
        .route("/api/vouchers/extract", post(extract_fields))
        .route("/api/vouchers/validate", post(validate_voucher))
        .route("/api/vouchers/redeem-check", post(redeem_check))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(addr: &str, state: AppState, max_body_bytes: usize) -> Result<(), std::io::Error> {
    let app = build_router(state, max_body_bytes);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await
}
