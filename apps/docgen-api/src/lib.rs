//! Docgen API server - document generation backend
//!
//! Serves the two frontend pages, hosts static assets, and exposes the
//! `/api/generate-pdf` endpoint backed by `docgen-core`.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::AppState;

/// Build the CORS layer from `CORS_ORIGINS` (comma-separated). Absent or
/// `*` allows any origin without credentials.
pub fn cors_layer() -> CorsLayer {
    let origins = std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
    cors_layer_from(&origins)
}

/// An explicit origin list also allows credentials; tower-http rejects
/// wildcard methods/headers alongside credentials, so the credentialed
/// branch mirrors whatever the preflight asks for instead.
pub fn cors_layer_from(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let list: Vec<axum::http::HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(list))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Assemble the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // HTML pages
        .route("/", get(handlers::index))
        .route("/functions", get(handlers::functions))
        // API endpoints
        .route("/api/", get(handlers::api_root))
        .route("/api/generate-pdf", post(handlers::generate_pdf))
        // Static assets
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
