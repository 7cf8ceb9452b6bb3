//! Data models
//!
//! Shared between menu-server and API consumers.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod dish;
pub mod order;
pub mod user;

// Re-exports
pub use category::*;
pub use dish::*;
pub use order::*;
pub use user::*;

pub use crate::order::OrderStatus;
