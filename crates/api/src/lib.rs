//! HTTP layer with Axum routes.
//!
//! This crate provides:
//! - The HTML form and the `/build` download endpoint
//! - JSON preview and document endpoints under `/api/v1`
//! - Error responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use dkm_core::normalizer::Normalizer;
use dkm_shared::AppConfig;
use dkm_shared::types::ReportTemplate;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Largest accepted request body. A full form is a few kilobytes.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report layout and fixed item definitions.
    pub template: Arc<ReportTemplate>,
    /// Form parsing settings.
    pub normalizer: Normalizer,
}

impl AppState {
    /// Builds the state from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            template: Arc::new(config.template.clone()),
            normalizer: Normalizer::from_config(&config.form),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::form_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
