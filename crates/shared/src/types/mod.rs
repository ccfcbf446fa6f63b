//! Common types used across the application.

pub mod money;
pub mod template;

pub use money::{
    AmountError, MAX_AMOUNT, MAX_ROWS, ParseMode, Rupiah, format_currency, parse_currency,
};
pub use template::{
    COUNT_PLACEHOLDER, FixedItemSpec, ReportTemplate, RtBreakdownSpec, SectionLabels,
    SignatoryTemplate,
};
