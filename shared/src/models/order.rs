//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::i18n::LocalizedText;
use crate::order::{OrderStatus, line_price, total_price};

/// Customer order with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    /// Unix millis
    pub created_at: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One dish in an order; `(order_id, dish_id)` is unique
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub dish_id: i64,
    pub dish_name: LocalizedText,
    pub dish_slug: String,
    /// Current dish price
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_price(&self) -> Decimal {
        line_price(self.unit_price, self.quantity)
    }
}

impl Order {
    pub fn total_price(&self) -> Decimal {
        total_price(self.items.iter().map(|i| (i.unit_price, i.quantity)))
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_quantity() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(id: i64, price: &str, quantity: u32) -> OrderItem {
        OrderItem {
            id,
            order_id: 1,
            dish_id: id,
            dish_name: LocalizedText::new(),
            dish_slug: format!("dish-{id}"),
            unit_price: Decimal::from_str(price).unwrap(),
            quantity,
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        Order {
            id: 1,
            user_id: 7,
            username: "guest".into(),
            created_at: 0,
            status: OrderStatus::New,
            items,
        }
    }

    #[test]
    fn test_totals() {
        let o = order(vec![item(1, "1200.00", 2), item(2, "350.50", 1)]);
        assert_eq!(o.total_price().to_string(), "2750.50");
        assert_eq!(o.total_quantity(), 3);
        assert_eq!(o.items[0].line_price().to_string(), "2400.00");
        assert!(!o.is_empty());
    }

    #[test]
    fn test_empty_order() {
        let o = order(Vec::new());
        assert!(o.is_empty());
        assert_eq!(o.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(order(Vec::new())).unwrap();
        assert_eq!(json["status"], "new");
    }
}
