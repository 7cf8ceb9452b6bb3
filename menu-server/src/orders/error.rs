use shared::error::{AppError, ErrorCode};
use shared::order::TransitionError;
use thiserror::Error;

use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(i64),

    #[error("Dish not found: {0}")]
    DishNotFound(i64),

    #[error("Dish is not available: {0}")]
    DishUnavailable(i64),

    #[error("Age confirmation required for dish {0}")]
    AgeRequired(i64),

    #[error("No open order to submit")]
    NoOpenOrder,

    #[error("Order {0} has no items")]
    EmptyOrder(i64),

    #[error("Order {0} is already in the kitchen")]
    OrderInKitchen(i64),

    #[error("Order {order_id}: {source}")]
    InvalidTransition {
        order_id: i64,
        source: TransitionError,
    },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Repo(err.into())
    }
}

impl OrderError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::NotFound(_) => ErrorCode::OrderNotFound,
            OrderError::DishNotFound(_) => ErrorCode::DishNotFound,
            OrderError::DishUnavailable(_) => ErrorCode::DishUnavailable,
            OrderError::AgeRequired(_) => ErrorCode::AgeRequired,
            OrderError::NoOpenOrder => ErrorCode::NoOpenOrder,
            OrderError::EmptyOrder(_) => ErrorCode::OrderEmpty,
            OrderError::OrderInKitchen(_) => ErrorCode::OrderInKitchen,
            OrderError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            OrderError::Repo(RepoError::NotFound(_)) => ErrorCode::NotFound,
            OrderError::Repo(RepoError::Business(code, _)) => *code,
            OrderError::Repo(_) => ErrorCode::DatabaseError,
        }
    }

    /// Order the failure refers to, when known
    pub fn order_id(&self) -> Option<i64> {
        match self {
            OrderError::NotFound(id)
            | OrderError::EmptyOrder(id)
            | OrderError::OrderInKitchen(id)
            | OrderError::InvalidTransition { order_id: id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Repo(repo) => repo.into(),
            OrderError::InvalidTransition { order_id, source } => {
                AppError::from(source).with_detail("order_id", order_id)
            }
            other => {
                let error = AppError::with_message(other.code(), other.to_string());
                match other.order_id() {
                    Some(id) => error.with_detail("order_id", id),
                    None => error,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use shared::order::{OrderStatus, Transition};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (OrderError::NotFound(1), StatusCode::NOT_FOUND, "not_found"),
            (OrderError::DishUnavailable(2), StatusCode::NOT_FOUND, "unavailable"),
            (OrderError::AgeRequired(3), StatusCode::FORBIDDEN, "age_required"),
            (OrderError::NoOpenOrder, StatusCode::BAD_REQUEST, "no_order"),
            (OrderError::EmptyOrder(4), StatusCode::BAD_REQUEST, "empty"),
            (OrderError::OrderInKitchen(5), StatusCode::CONFLICT, "order_in_kitchen"),
        ];
        for (err, status, key) in cases {
            assert_eq!(err.code().key(), key);
            assert_eq!(AppError::from(err).http_status(), status);
        }
    }

    #[test]
    fn test_transition_error_keeps_order_id() {
        let err = OrderError::InvalidTransition {
            order_id: 9,
            source: OrderStatus::New.apply(Transition::MarkReady).unwrap_err(),
        };
        assert_eq!(err.order_id(), Some(9));
        let app = AppError::from(err);
        assert_eq!(app.code, ErrorCode::InvalidTransition);
        assert_eq!(app.details.unwrap()["order_id"], 9);
    }
}
