//! Shared types for the menu service
//!
//! Domain types and rules used by the server and its API consumers:
//! localized text, slugs, catalog/order models, the order state machine,
//! wire payloads and the unified error system.

pub mod error;
pub mod i18n;
pub mod models;
pub mod order;
pub mod payload;
pub mod slug;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use i18n::{Lang, LocalizedText};
