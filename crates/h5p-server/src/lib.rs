//! H5P demo HTTP server
//!
//! Routes for listing, editing, saving and playing content packages. All
//! real work is delegated to an [`Editor`] and a [`Player`]; this crate only
//! dispatches requests and maps results onto HTTP responses.

use axum::{Router, extract::DefaultBodyLimit, response::Json, routing::get};
use h5p_kit::{Editor, EditorConfig, FileContentStorage, Player};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod examples;
pub mod models;
pub mod routes;
pub mod templates;

use config::ServerConfig;
use error::Result;
use examples::ExampleFetcher;

/// Main application state
#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<dyn Editor>,
    pub player: Arc<dyn Player>,
    /// Read-only view of the content root used for listing and playback
    pub content: FileContentStorage,
    pub examples: Arc<ExampleFetcher>,
    pub editor_config: Arc<EditorConfig>,
    pub config: ServerConfig,
}

/// Create the main application router
///
/// Static mounts for the H5P root and for every registered example are
/// created here, once.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .merge(routes::router())
        .nest_service("/h5p", ServeDir::new(&state.config.h5p_root));

    for key in state.examples.registry().keys() {
        router = router.nest_service(
            &format!("/examples/{key}/files"),
            ServeDir::new(state.examples.example_dir(key)),
        );
    }

    let body_limit = state.config.max_upload_bytes;

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Result<Json<Value>> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "h5p-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": time::OffsetDateTime::now_utc()
    })))
}
