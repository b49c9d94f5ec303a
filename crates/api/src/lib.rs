//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The media ingest endpoint
//! - Health check endpoint
//! - Pipeline-error-to-status mapping

pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use medley_core::pipeline::MediaPipeline;
use medley_core::storage::OpendalBlobStore;

/// Request body ceiling, sized above the transcoder's input ceiling to
/// leave room for multipart framing.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The media ingestion pipeline.
    pub pipeline: Arc<MediaPipeline<OpendalBlobStore>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
