//! Order domain rules
//!
//! Pure state machine and money arithmetic; persistence and locking live in
//! the server's order service.

pub mod money;
pub mod status;

pub use money::{PriceError, line_price, normalize_price, total_price};
pub use status::{OrderStatus, Transition, TransitionError};
