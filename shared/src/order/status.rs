//! Order lifecycle
//!
//! ```text
//! new ──finalize/accept──▶ kitchen ──mark_ready──▶ ready
//! ```
//!
//! No transition skips a state and nothing moves backwards. `accept` and
//! `mark_ready` are idempotent on their target state so repeated staff
//! clicks are harmless.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Cart being built by the customer
    New,
    /// Submitted, waiting for or being prepared by the kitchen
    Kitchen,
    /// Fulfilled (terminal)
    Ready,
}

/// Status-changing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Customer submits the cart
    Finalize,
    /// Kitchen acknowledges the order
    Accept,
    /// Kitchen finished the order
    MarkReady,
}

impl Transition {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Transition::Finalize => "finalize",
            Transition::Accept => "accept",
            Transition::MarkReady => "mark_ready",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {} an order in status {from}", .transition.as_str())]
pub struct TransitionError {
    pub from: OrderStatus,
    pub transition: Transition,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Kitchen => "kitchen",
            OrderStatus::Ready => "ready",
        }
    }

    /// Target status of `transition` from `self`
    pub fn apply(self, transition: Transition) -> Result<OrderStatus, TransitionError> {
        use OrderStatus::*;
        let next = match (transition, self) {
            (Transition::Finalize, New) => Kitchen,
            (Transition::Accept, New | Kitchen) => Kitchen,
            (Transition::MarkReady, Kitchen | Ready) => Ready,
            _ => {
                return Err(TransitionError {
                    from: self,
                    transition,
                });
            }
        };
        Ok(next)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "kitchen" => Ok(OrderStatus::Kitchen),
            "ready" => Ok(OrderStatus::Ready),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let s = OrderStatus::New;
        let s = s.apply(Transition::Finalize).unwrap();
        assert_eq!(s, OrderStatus::Kitchen);
        let s = s.apply(Transition::MarkReady).unwrap();
        assert_eq!(s, OrderStatus::Ready);
    }

    #[test]
    fn test_finalize_only_from_new() {
        assert!(OrderStatus::Kitchen.apply(Transition::Finalize).is_err());
        assert!(OrderStatus::Ready.apply(Transition::Finalize).is_err());
    }

    #[test]
    fn test_accept_is_idempotent() {
        assert_eq!(
            OrderStatus::New.apply(Transition::Accept),
            Ok(OrderStatus::Kitchen)
        );
        assert_eq!(
            OrderStatus::Kitchen.apply(Transition::Accept),
            Ok(OrderStatus::Kitchen)
        );
    }

    #[test]
    fn test_no_backward_transition() {
        let err = OrderStatus::Ready.apply(Transition::Accept).unwrap_err();
        assert_eq!(err.from, OrderStatus::Ready);
        assert_eq!(err.transition, Transition::Accept);
    }

    #[test]
    fn test_mark_ready_cannot_skip_kitchen() {
        assert!(OrderStatus::New.apply(Transition::MarkReady).is_err());
    }

    #[test]
    fn test_mark_ready_twice_is_idempotent() {
        let s = OrderStatus::Kitchen.apply(Transition::MarkReady).unwrap();
        assert_eq!(s.apply(Transition::MarkReady), Ok(OrderStatus::Ready));
    }

    #[test]
    fn test_parse_and_display() {
        for s in [OrderStatus::New, OrderStatus::Kitchen, OrderStatus::Ready] {
            assert_eq!(s.to_string().parse::<OrderStatus>(), Ok(s));
        }
        assert!("cooking".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = OrderStatus::New.apply(Transition::MarkReady).unwrap_err();
        assert_eq!(err.to_string(), "cannot mark_ready an order in status new");
    }
}
