//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dkm_core::normalizer::NormalizeError;
use dkm_render::RenderError;
use dkm_shared::AppError;
use serde_json::json;

/// An [`AppError`] on its way to the client as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match &self.0 {
            AppError::Validation(message) => message.as_str(),
            AppError::Internal(_) => "Failed to generate the report",
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        Self(err.into())
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        Self(err.into())
    }
}
