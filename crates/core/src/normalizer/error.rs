//! Normalization error types.

use dkm_shared::AppError;
use thiserror::Error;

/// Errors that reject a form submission before any report is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A mandatory header field is absent or blank.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// A number could not be read (strict parsing only).
    #[error("Unparsable amount in {field}: {value:?}")]
    UnparsableAmount {
        /// Form field name.
        field: String,
        /// Value as entered.
        value: String,
    },
}

impl NormalizeError {
    /// Name of the offending form field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequiredField(field) | Self::UnparsableAmount { field, .. } => field,
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        Self::Validation(err.to_string())
    }
}
