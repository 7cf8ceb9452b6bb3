//! Order Repository
//!
//! Every function takes a connection so the order service can run a whole
//! read-modify-write inside one transaction (`&mut *tx`). SQLite has no
//! `SELECT ... FOR UPDATE`; the `lock_*` helpers issue a no-op `UPDATE`
//! instead, which takes the write lock for the rest of the transaction.

use super::{RepoError, RepoResult, parse_money};
use shared::i18n::LocalizedText;
use shared::models::{Order, OrderItem};
use shared::order::OrderStatus;
use sqlx::SqliteConnection;
use std::collections::HashMap;

const SELECT_ORDER: &str = "SELECT o.id, o.user_id, u.username, o.created_at, o.status \
     FROM orders o JOIN users u ON u.id = o.user_id";

const SELECT_ITEM: &str = "SELECT i.id, i.order_id, i.dish_id, i.quantity, d.name_ru, d.name_kk, d.name_en, d.slug, d.base_price \
     FROM order_items i JOIN dishes d ON d.id = i.dish_id";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    username: String,
    created_at: i64,
    status: String,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> RepoResult<Order> {
        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            username: self.username,
            created_at: self.created_at,
            status: parse_status(&self.status)?,
            items,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    order_id: i64,
    dish_id: i64,
    quantity: i64,
    name_ru: String,
    name_kk: String,
    name_en: String,
    slug: Option<String>,
    base_price: String,
}

impl ItemRow {
    fn into_item(self) -> RepoResult<OrderItem> {
        Ok(OrderItem {
            id: self.id,
            order_id: self.order_id,
            dish_id: self.dish_id,
            dish_name: LocalizedText::from_parts(self.name_ru, self.name_kk, self.name_en),
            dish_slug: self.slug.unwrap_or_default(),
            unit_price: parse_money(&self.base_price)?,
            quantity: to_quantity(self.quantity)?,
        })
    }
}

fn parse_status(raw: &str) -> RepoResult<OrderStatus> {
    raw.parse().map_err(RepoError::Database)
}

fn to_quantity(raw: i64) -> RepoResult<u32> {
    u32::try_from(raw).map_err(|_| RepoError::Database(format!("Corrupt quantity {raw}")))
}

/// The user's open order (`new` or `kitchen`), created as `new` when the user
/// has none. The insert runs first so a transaction calling this holds the
/// write lock before it reads.
pub async fn ensure_open_order(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<(i64, OrderStatus)> {
    // the partial unique index on open orders turns a second insert into a no-op
    sqlx::query(
        "INSERT INTO orders (user_id, created_at, status) VALUES (?, ?, 'new') ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(shared::util::now_millis())
    .execute(&mut *conn)
    .await?;

    let (id, status): (i64, String) = sqlx::query_as(
        "SELECT id, status FROM orders WHERE user_id = ? AND status IN ('new', 'kitchen') LIMIT 1",
    )
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok((id, parse_status(&status)?))
}

/// Lock an order row; returns its status, or `None` if it does not exist
pub async fn lock(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<Option<OrderStatus>> {
    let status: Option<String> =
        sqlx::query_scalar("UPDATE orders SET id = id WHERE id = ? RETURNING status")
            .bind(order_id)
            .fetch_optional(&mut *conn)
            .await?;
    status.as_deref().map(parse_status).transpose()
}

/// Lock the user's `new` order; returns its id, or `None` if there is none
pub async fn lock_new_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<Option<i64>> {
    let id = sqlx::query_scalar(
        "UPDATE orders SET id = id WHERE user_id = ? AND status = 'new' RETURNING id",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(id)
}

/// Add one unit of a dish: inserts the line with quantity 1 or bumps the
/// existing line. Returns `(item_id, quantity)` after the change.
pub async fn upsert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    dish_id: i64,
) -> RepoResult<(i64, u32)> {
    let (item_id, quantity): (i64, i64) = sqlx::query_as(
        "INSERT INTO order_items (order_id, dish_id, quantity) VALUES (?, ?, 1) \
         ON CONFLICT (order_id, dish_id) DO UPDATE SET quantity = quantity + 1 \
         RETURNING id, quantity",
    )
    .bind(order_id)
    .bind(dish_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok((item_id, to_quantity(quantity)?))
}

pub async fn total_quantity(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<u32> {
    let total: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM order_items WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(&mut *conn)
            .await?;
    to_quantity(total)
}

pub async fn set_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
) -> RepoResult<()> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }
    Ok(())
}

async fn load_items(
    conn: &mut SqliteConnection,
    order_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<OrderItem>>> {
    let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(grouped);
    }
    let placeholders = vec!["?"; order_ids.len()].join(", ");
    let sql = format!("{SELECT_ITEM} WHERE i.order_id IN ({placeholders}) ORDER BY i.id");
    let mut query = sqlx::query_as::<_, ItemRow>(&sql);
    for id in order_ids {
        query = query.bind(id);
    }
    for row in query.fetch_all(&mut *conn).await? {
        let item = row.into_item()?;
        grouped.entry(item.order_id).or_default().push(item);
    }
    Ok(grouped)
}

async fn with_items(conn: &mut SqliteConnection, rows: Vec<OrderRow>) -> RepoResult<Vec<Order>> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut items = load_items(conn, &ids).await?;
    rows.into_iter()
        .map(|row| {
            let lines = items.remove(&row.id).unwrap_or_default();
            row.into_order(lines)
        })
        .collect()
}

/// Order with its lines and their dishes
pub async fn find_with_items(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE o.id = ?"))
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;
    match row {
        Some(row) => Ok(with_items(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// The user's open order, if any
pub async fn find_open_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "{SELECT_ORDER} WHERE o.user_id = ? AND o.status IN ('new', 'kitchen') \
         ORDER BY o.created_at DESC, o.id DESC LIMIT 1"
    ))
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;
    match row {
        Some(row) => Ok(with_items(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Orders waiting on the kitchen (`new` and `kitchen`), newest first
pub async fn kitchen_queue(conn: &mut SqliteConnection) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "{SELECT_ORDER} WHERE o.status IN ('new', 'kitchen') ORDER BY o.created_at DESC, o.id DESC"
    ))
    .fetch_all(&mut *conn)
    .await?;
    with_items(conn, rows).await
}
