//! Common utilities shared across crates.
//!
//! This crate provides:
//! - Unified error handling rendered as JSON HTTP responses
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
