//! Order aggregate model
//!
//! Items are embedded in the order record so that item mutations, total
//! recomputation and the order row itself commit in one write. The
//! `(order, product)` pair is unique: adding more of the same product
//! increments the existing line.

use serde::{Deserialize, Serialize};
use shared::money::{self, to_f64};
use shared::util;
use shared::OrderStatus;

/// Order line item
///
/// `price_at_purchase` is captured once from the product's current price and
/// never changes afterwards, decoupling order history from catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price_at_purchase: f64,
}

impl OrderItem {
    pub fn new(product_id: &str, product_name: &str, quantity: u32, price: f64) -> Self {
        Self {
            id: util::new_id(),
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            quantity,
            price_at_purchase: price,
        }
    }
}

/// Order aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub subtotal_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn new(user_id: Option<String>, email: Option<String>, notes: Option<String>) -> Self {
        let now = util::now_millis();
        Self {
            id: util::new_id(),
            order_number: util::new_order_number(),
            user_id,
            email,
            subtotal_amount: 0.0,
            discount_amount: 0.0,
            total_amount: 0.0,
            status: OrderStatus::Pending,
            notes,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute subtotal and total from current items and discount
    ///
    /// Invariants restored here: `subtotal = Σ(price_at_purchase × quantity)`
    /// and `total = subtotal − discount`.
    pub fn recalculate_totals(&mut self) {
        let subtotal: rust_decimal::Decimal = self
            .items
            .iter()
            .map(|item| money::line_total(item.price_at_purchase, item.quantity))
            .sum();
        self.subtotal_amount = to_f64(subtotal);
        self.total_amount = to_f64(subtotal - money::to_decimal(self.discount_amount));
        self.updated_at = util::now_millis();
    }

    /// Find an item by its id
    pub fn item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

/// Append-only audit log entry for an order
///
/// Never mutated or deleted after creation. `triggered_by = None` marks a
/// system-triggered event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub order_id: String,
    pub seq: u64,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new(None, Some("guest@example.com".into()), None);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 0.0);
        assert!(order.order_number.starts_with("ORD-"));
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_recalculate_totals() {
        let mut order = Order::new(Some("user-1".into()), None, None);
        order.items.push(OrderItem::new("p1", "Widget", 2, 10.0));
        order.items.push(OrderItem::new("p2", "Gadget", 1, 5.5));
        order.recalculate_totals();
        assert_eq!(order.subtotal_amount, 25.5);
        assert_eq!(order.total_amount, 25.5);

        order.discount_amount = 2.55;
        order.recalculate_totals();
        assert_eq!(order.subtotal_amount, 25.5);
        assert_eq!(order.total_amount, 22.95);
    }

    #[test]
    fn test_totals_survive_penny_items() {
        let mut order = Order::new(Some("user-1".into()), None, None);
        for i in 0..100 {
            order
                .items
                .push(OrderItem::new(&format!("p{}", i), "Penny", 1, 0.01));
        }
        order.recalculate_totals();
        assert_eq!(order.subtotal_amount, 1.0);
    }
}
