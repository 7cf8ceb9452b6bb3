//! Wire payloads
//!
//! Shapes returned to API consumers and page renderers. Text fields are
//! already resolved for the request language and image fields are absolute
//! URLs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::i18n::Lang;
use crate::models::Order;
use crate::order::OrderStatus;

/// Category as served by the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub position: i32,
    pub show_in_nav: bool,
    pub nav_position: i32,
    #[serde(rename = "image")]
    pub image_url: Option<String>,
    /// Category image, else the first dish image
    pub cover_background_url: Option<String>,
    pub requires_21: bool,
    /// 21+ and the client has not confirmed; data is still included
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dishes: Vec<DishPayload>,
    pub lang: Lang,
}

/// Dish as served by the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishPayload {
    pub id: i64,
    pub category_id: i64,
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "base_price")]
    pub price: Decimal,
    pub is_available: bool,
    pub position: i32,
    #[serde(rename = "image")]
    pub image_url: Option<String>,
    #[serde(rename = "passport_bg")]
    pub passport_bg_url: Option<String>,
    /// Passport background, else the category cover
    pub cover_background_url: Option<String>,
    pub requires_21: bool,
    pub locked: bool,
    pub lang: Lang,
}

/// Result of an order action for programmatic callers
///
/// ```json
/// {"ok": true, "order_id": 3, "status": "new", "quantity": 2, "item_id": 9}
/// {"ok": false, "order_id": null, "error": "age_required"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderActionResponse {
    pub ok: bool,
    pub order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
}

impl OrderActionResponse {
    pub fn success(order_id: i64, status: OrderStatus) -> Self {
        Self {
            ok: true,
            order_id: Some(order_id),
            status: Some(status),
            error: None,
            quantity: None,
            item_id: None,
        }
    }

    pub fn with_item(mut self, item_id: i64, quantity: u32) -> Self {
        self.item_id = Some(item_id);
        self.quantity = Some(quantity);
        self
    }

    pub fn failure(order_id: Option<i64>, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            order_id,
            status: None,
            error: Some(error.into()),
            quantity: None,
            item_id: None,
        }
    }
}

/// One line of an [`OrderSummary`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: i64,
    pub dish_id: i64,
    pub dish_slug: String,
    pub dish_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_price: Decimal,
}

/// Order with totals and language-resolved dish names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub created_at: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
    pub total_quantity: u32,
    pub total_price: Decimal,
}

impl OrderSummary {
    pub fn from_order(order: &Order, lang: Lang) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| OrderLine {
                item_id: item.id,
                dish_id: item.dish_id,
                dish_slug: item.dish_slug.clone(),
                dish_name: item.dish_name.resolve(lang).to_string(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                line_price: item.line_price(),
            })
            .collect();
        Self {
            id: order.id,
            user_id: order.user_id,
            username: order.username.clone(),
            created_at: order.created_at,
            status: order.status,
            items,
            total_quantity: order.total_quantity(),
            total_price: order.total_price(),
        }
    }
}
