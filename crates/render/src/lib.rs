//! Document writers for the compiled report.
//!
//! Writers consume the technology-neutral [`RenderBlock`](dkm_core::reports::RenderBlock)
//! list produced by the report compiler and know nothing about totals or form fields.
//!
//! # Modules
//!
//! - `format` - Output format selection, file extension and content type
//! - `docx` - Office Open XML package, the default download
//! - `wordml` - Single-file WordprocessingML 2003 document
//! - `text` - Fixed-width plain text

pub mod docx;
pub mod error;
pub mod format;
mod markup;
pub mod text;
pub mod wordml;

pub use docx::Docx;
pub use error::RenderError;
pub use format::{DocumentFormat, WriteDocument};
pub use text::PlainText;
pub use wordml::WordMl;
