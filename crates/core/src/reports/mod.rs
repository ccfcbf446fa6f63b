//! Monthly cash-flow report compilation.
//!
//! This module turns a normalized [`ReportRequest`] into:
//! - Totals (income, gross balance, expense, closing balance)
//! - An ordered list of render blocks that any document writer can lay out
//! - The download filename

pub mod service;
pub mod types;


pub use service::{FILENAME_PREFIX, ReportService};
pub use types::*;
