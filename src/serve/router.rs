//! Site router.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the router serving static files from the site root.
///
/// Routes:
/// - GET /health - liveness probe
/// - anything else - served from the site root directory
pub fn site_router(site_root: &Path) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback_service(ServeDir::new(site_root))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
