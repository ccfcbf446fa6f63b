//! Form input normalization.
//!
//! Turns the raw field-name → string mapping posted by the form into a typed
//! [`ReportRequest`](crate::reports::ReportRequest):
//! - Header fields are mandatory
//! - Thousands-separated amounts become whole rupiah
//! - Numbered custom rows become an ordered, capped list of line items

pub mod error;
pub mod fields;
pub mod service;


pub use error::NormalizeError;
pub use fields::{FormFields, RawRow, RowCategory};
pub use service::Normalizer;
