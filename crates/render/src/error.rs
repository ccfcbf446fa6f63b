//! Rendering error types.

use dkm_shared::AppError;
use thiserror::Error;

/// Errors that can occur while writing a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The XML writer rejected an event.
    #[error("XML error: {0}")]
    Xml(String),

    /// The .docx package could not be assembled.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The requested output format does not exist.
    #[error("Unknown document format: {0}")]
    UnknownFormat(String),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::UnknownFormat(_) => Self::Validation(err.to_string()),
            RenderError::Io(_) | RenderError::Xml(_) | RenderError::Zip(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

pub(crate) fn xml<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Xml(e.to_string())
}
