//! Core report logic for the DKM monthly financial report.
//!
//! This crate contains pure logic with ZERO web or document-format dependencies.
//! Form parsing, totals, and the layout of the report live here.
//!
//! # Modules
//!
//! - `normalizer` - Turns a raw form submission into a [`reports::ReportRequest`]
//! - `reports` - Totals and the block layout of the printed report

pub mod normalizer;
pub mod reports;
