//! Order service
//!
//! Each operation that changes an order runs in one transaction whose first
//! statement writes the order row, so concurrent adds and transitions on the
//! same order are serialized by SQLite's write lock.

use shared::models::Order;
use shared::order::{OrderStatus, Transition};
use sqlx::SqlitePool;

use super::error::OrderError;
use crate::auth::CurrentUser;
use crate::db::repository::{dish, order};
use crate::security_log;

pub type OrderResult<T> = Result<T, OrderError>;

/// Outcome of adding one unit of a dish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedItem {
    pub order_id: i64,
    pub item_id: i64,
    pub quantity: u32,
    pub status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add one unit of `dish_id` to the user's open order
    ///
    /// Creates the order on first use. Fails while the user's open order is
    /// already in the kitchen.
    pub async fn add_item(
        &self,
        user: &CurrentUser,
        dish_id: i64,
        age_verified: bool,
    ) -> OrderResult<AddedItem> {
        let dish = dish::find_by_id(&self.pool, dish_id)
            .await?
            .ok_or(OrderError::DishNotFound(dish_id))?;
        if !dish.is_available {
            return Err(OrderError::DishUnavailable(dish_id));
        }
        if dish.locked(age_verified) {
            return Err(OrderError::AgeRequired(dish_id));
        }

        let mut tx = self.pool.begin().await?;
        let (order_id, status) = order::ensure_open_order(&mut *tx, user.id).await?;
        if status != OrderStatus::New {
            return Err(OrderError::OrderInKitchen(order_id));
        }
        let (item_id, quantity) = order::upsert_item(&mut *tx, order_id, dish_id).await?;
        tx.commit().await?;

        tracing::info!(
            order_id,
            user_id = user.id,
            dish_id,
            quantity,
            "Dish added to order"
        );
        Ok(AddedItem {
            order_id,
            item_id,
            quantity,
            status,
        })
    }

    /// Submit the user's `new` order to the kitchen
    pub async fn finalize(&self, user: &CurrentUser) -> OrderResult<(i64, OrderStatus)> {
        let mut tx = self.pool.begin().await?;
        let order_id = order::lock_new_for_user(&mut *tx, user.id)
            .await?
            .ok_or(OrderError::NoOpenOrder)?;
        if order::total_quantity(&mut *tx, order_id).await? == 0 {
            return Err(OrderError::EmptyOrder(order_id));
        }

        let next = OrderStatus::New
            .apply(Transition::Finalize)
            .map_err(|source| OrderError::InvalidTransition { order_id, source })?;
        order::set_status(&mut *tx, order_id, next).await?;
        tx.commit().await?;

        tracing::info!(
            order_id,
            user_id = user.id,
            from = %OrderStatus::New,
            to = %next,
            "Order submitted to kitchen"
        );
        Ok((order_id, next))
    }

    /// Kitchen acknowledges the order
    pub async fn accept(&self, staff: &CurrentUser, order_id: i64) -> OrderResult<OrderStatus> {
        self.transition(staff, order_id, Transition::Accept).await
    }

    /// Kitchen finished the order
    pub async fn mark_ready(&self, staff: &CurrentUser, order_id: i64) -> OrderResult<OrderStatus> {
        self.transition(staff, order_id, Transition::MarkReady).await
    }

    async fn transition(
        &self,
        staff: &CurrentUser,
        order_id: i64,
        transition: Transition,
    ) -> OrderResult<OrderStatus> {
        let mut tx = self.pool.begin().await?;
        let current = order::lock(&mut *tx, order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;
        let next = current
            .apply(transition)
            .map_err(|source| OrderError::InvalidTransition { order_id, source })?;

        if next == current {
            // repeated clicks leave the order as it is
            return Ok(current);
        }
        order::set_status(&mut *tx, order_id, next).await?;
        tx.commit().await?;

        tracing::info!(
            order_id,
            staff_id = staff.id,
            from = %current,
            to = %next,
            "Order status changed"
        );
        security_log!(
            "INFO",
            "order_transition",
            order_id = order_id,
            staff = staff.username.as_str(),
            transition = transition.as_str()
        );
        Ok(next)
    }

    /// Orders the kitchen still has to handle, newest first
    pub async fn kitchen_queue(&self) -> OrderResult<Vec<Order>> {
        let mut conn = self.pool.acquire().await?;
        Ok(order::kitchen_queue(&mut conn).await?)
    }

    /// The user's latest open order
    pub async fn open_order(&self, user_id: i64) -> OrderResult<Option<Order>> {
        let mut conn = self.pool.acquire().await?;
        Ok(order::find_open_for_user(&mut conn, user_id).await?)
    }

    pub async fn find(&self, order_id: i64) -> OrderResult<Order> {
        let mut conn = self.pool.acquire().await?;
        order::find_with_items(&mut conn, order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))
    }
}
