//! Shared utilities
//!
//! Error types and their HTTP mapping.

pub mod errors;

pub use errors::{AppError, AppResult};
