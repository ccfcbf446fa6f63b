//! Route definitions.

use axum::Router;

use crate::AppState;

pub mod form;
pub mod health;
pub mod reports;

/// Browser-facing routes: the form page and its download target.
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .merge(form::routes())
        .merge(reports::form_routes())
}

/// JSON routes, nested under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
}
