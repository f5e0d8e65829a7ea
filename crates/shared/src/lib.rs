//! Shared errors and configuration for CashFlow.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management, including report presentation settings

pub mod config;
pub mod error;

pub use config::{
    AppConfig, DatabaseConfig, ReportConfig, ReportLabels, RoundingMode, ServerConfig,
};
pub use error::{AppError, AppResult};
