// Web server module
// HTTP plumbing around the enhancement core: routing, multipart extraction,
// response encoding, CORS and request tracing.

pub mod error;
mod extract;
mod handlers;
mod listeners;
mod models;

pub use listeners::create_listener;

use crate::enhancer::Enhancer;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

// Maximum allowed size for image upload requests
pub const MAX_IMAGE_SIZE_BYTES: usize = 100 * 1024 * 1024; // 100MB

pub type SharedEnhancer = Arc<Enhancer>;

pub fn create_app(enhancer: SharedEnhancer) -> Router {
    // Configure the router with all API endpoints
    Router::new()
        .route("/process", post(handlers::process_image))
        .route("/health", get(handlers::health))
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES))
        // Add CORS layer for broader client compatibility
        .layer(CorsLayer::permissive())
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        // Provide the shared state
        .with_state(enhancer)
}
