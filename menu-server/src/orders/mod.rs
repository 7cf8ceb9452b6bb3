//! Customer orders and the kitchen queue
//!
//! ```text
//! add_item ──▶ new ──finalize──▶ kitchen ──mark_ready──▶ ready
//!                  └───accept────▶
//! ```

pub mod error;
pub mod service;

pub use error::OrderError;
pub use service::{AddedItem, OrderResult, OrderService};
