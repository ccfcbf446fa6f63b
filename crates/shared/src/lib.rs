//! Shared types, errors, and configuration for the DKM report generator.
//!
//! This crate provides common types used across all other crates:
//! - Whole-rupiah money type and the thousands-separated notation of the form
//! - The report template (organization texts, fixed line items, signatories)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FormConfig, ServerConfig};
pub use error::AppError;
