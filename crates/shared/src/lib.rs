//! Shared types, errors, and configuration for Bahi.
//!
//! This crate provides common types used across all other crates:
//! - Minor-unit money types (integer paise, never floating point)
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
