//! Utilities shared by the HTTP layer
//!
//! - [`AppError`] / [`ApiResponse`] - boundary error types (from `shared::error`)
//! - [`format`] - browser vs programmatic response selection
//! - [`flash`] - one-shot messages carried across a redirect
//! - [`urls`] - absolute URLs for media and query encoding
//! - [`logger`] - tracing subscriber setup

pub mod flash;
pub mod format;
pub mod logger;
pub mod urls;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
