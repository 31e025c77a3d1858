//! Order coordinator
//!
//! Owns order status, items, and derived totals, and gates which mutations
//! are legal in the current status. Every operation runs inside one store
//! transaction spanning status check → mutation → stock writes → timeline
//! append → commit, so no partial state is ever observable. Stock moves with
//! the item mutation that caused it, in the same transaction.

pub mod coupons;

pub use coupons::CouponBook;

use shared::money::{to_decimal, to_f64};
use shared::{CreateOrderInput, DomainError, DomainResult, OrderStatus};
use tracing::info;

use crate::models::{Order, OrderItem, TimelineEvent};
use crate::store::CommerceStore;

pub struct OrderService {
    store: CommerceStore,
    coupons: CouponBook,
}

impl OrderService {
    pub fn new(store: CommerceStore, coupons: CouponBook) -> Self {
        Self { store, coupons }
    }

    /// Create an order with its initial items
    ///
    /// Duplicate product references in the request collapse into a single
    /// line with summed quantity. Stock is decremented per line; any failed
    /// line aborts the whole creation.
    pub fn create(&self, input: CreateOrderInput, actor: Option<&str>) -> DomainResult<Order> {
        if input.user_id.is_none() && input.email.is_none() {
            return Err(DomainError::Validation(
                "an order needs a registered user or a guest e-mail".to_string(),
            ));
        }
        if input.items.is_empty() {
            return Err(DomainError::Validation(
                "an order needs at least one item".to_string(),
            ));
        }

        // Collapse duplicate product lines, preserving first-seen order
        let mut lines: Vec<(String, u32)> = Vec::new();
        for item in &input.items {
            if item.quantity == 0 {
                return Err(DomainError::Validation(format!(
                    "quantity must be positive for product {}",
                    item.product_id
                )));
            }
            match lines.iter_mut().find(|(id, _)| *id == item.product_id) {
                Some((_, qty)) => *qty += item.quantity,
                None => lines.push((item.product_id.clone(), item.quantity)),
            }
        }

        let mut order = Order::new(input.user_id, input.email, input.notes);

        let txn = self.store.begin_write()?;
        for (product_id, quantity) in lines {
            let product = self
                .store
                .product_txn(&txn, &product_id)?
                .ok_or_else(|| DomainError::NotFound(format!("Product {}", product_id)))?;
            if !product.available {
                return Err(DomainError::Validation(format!(
                    "product {} is not available",
                    product.name
                )));
            }
            self.store
                .decrement_stock(&txn, &product.id, quantity)?
                .ok_or(DomainError::InsufficientStock {
                    product: product.name.clone(),
                    requested: quantity,
                    available: product.stock,
                })?;

            order.items.push(OrderItem::new(
                &product.id,
                &product.name,
                quantity,
                product.price,
            ));
        }

        order.recalculate_totals();
        self.store.put_order(&txn, &order)?;
        self.store.append_timeline(
            &txn,
            &order.id,
            Some(OrderStatus::Pending.as_str()),
            "Order created.",
            actor,
        )?;
        txn.commit()?;

        info!(order_number = %order.order_number, total = order.total_amount, "Order created");
        Ok(order)
    }

    /// Add an item (or more of an existing product) to a pending order
    pub fn add_item(
        &self,
        order_number: &str,
        product_id: &str,
        quantity: u32,
        actor: Option<&str>,
    ) -> DomainResult<Order> {
        if quantity == 0 {
            return Err(DomainError::Validation(
                "quantity must be positive".to_string(),
            ));
        }

        let txn = self.store.begin_write()?;
        let mut order = self.load_order(&txn, order_number)?;
        if !order.status.items_mutable() {
            return Err(DomainError::InvalidState(format!(
                "items can only be added while the order is pending (status: {})",
                order.status
            )));
        }

        let product = self
            .store
            .product_txn(&txn, product_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Product {}", product_id)))?;
        if !product.available {
            return Err(DomainError::Validation(format!(
                "product {} is not available",
                product.name
            )));
        }
        self.store
            .decrement_stock(&txn, &product.id, quantity)?
            .ok_or(DomainError::InsufficientStock {
                product: product.name.clone(),
                requested: quantity,
                available: product.stock,
            })?;

        // Uniqueness invariant: one line per (order, product)
        match order.items.iter().position(|i| i.product_id == product.id) {
            Some(idx) => order.items[idx].quantity += quantity,
            None => order
                .items
                .push(OrderItem::new(&product.id, &product.name, quantity, product.price)),
        }

        order.recalculate_totals();
        self.store.put_order(&txn, &order)?;
        self.store.append_timeline(
            &txn,
            &order.id,
            None,
            format!("Item {} (Qty: {}) added.", product.name, quantity),
            actor,
        )?;
        txn.commit()?;
        Ok(order)
    }

    /// Remove an item (fully by default, or a partial quantity)
    pub fn remove_item(
        &self,
        order_number: &str,
        item_id: &str,
        quantity: Option<u32>,
        actor: Option<&str>,
    ) -> DomainResult<Order> {
        let txn = self.store.begin_write()?;
        let mut order = self.load_order(&txn, order_number)?;
        if !order.status.items_mutable() {
            return Err(DomainError::InvalidState(format!(
                "items can only be removed while the order is pending (status: {})",
                order.status
            )));
        }

        let item = order
            .item(item_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Order item {}", item_id)))?;
        let removed = quantity.unwrap_or(item.quantity);
        if removed == 0 || removed > item.quantity {
            return Err(DomainError::Validation(format!(
                "cannot remove {} of {} (line quantity {})",
                removed, item.product_name, item.quantity
            )));
        }

        self.store
            .increment_stock(&txn, &item.product_id, removed)?
            .ok_or_else(|| DomainError::NotFound(format!("Product {}", item.product_id)))?;

        if removed == item.quantity {
            order.items.retain(|i| i.id != item_id);
        } else if let Some(line) = order.items.iter_mut().find(|i| i.id == item_id) {
            line.quantity -= removed;
        }

        order.recalculate_totals();
        self.store.put_order(&txn, &order)?;
        self.store.append_timeline(
            &txn,
            &order.id,
            None,
            format!("Item {} (Qty: {}) removed.", item.product_name, removed),
            actor,
        )?;
        txn.commit()?;
        Ok(order)
    }

    /// Apply a coupon code; exactly one discount per order
    pub fn apply_discount(
        &self,
        order_number: &str,
        code: &str,
        actor: Option<&str>,
    ) -> DomainResult<Order> {
        let rate = self
            .coupons
            .rate(code)
            .ok_or_else(|| DomainError::InvalidCoupon(format!("unrecognized code {}", code)))?;

        let txn = self.store.begin_write()?;
        let mut order = self.load_order(&txn, order_number)?;
        if order.discount_amount > 0.0 {
            return Err(DomainError::InvalidCoupon(
                "a discount is already applied".to_string(),
            ));
        }

        order.discount_amount = to_f64(to_decimal(order.subtotal_amount) * to_decimal(rate));
        order.recalculate_totals();
        self.store.put_order(&txn, &order)?;
        self.store.append_timeline(
            &txn,
            &order.id,
            None,
            format!(
                "Coupon {} applied. Discount: {:.2}",
                code.to_uppercase(),
                order.discount_amount
            ),
            actor,
        )?;
        txn.commit()?;
        Ok(order)
    }

    /// Clear a previously applied discount
    pub fn remove_discount(&self, order_number: &str, actor: Option<&str>) -> DomainResult<Order> {
        let txn = self.store.begin_write()?;
        let mut order = self.load_order(&txn, order_number)?;
        if order.discount_amount == 0.0 {
            return Err(DomainError::Validation(
                "no discount is applied to this order".to_string(),
            ));
        }

        order.discount_amount = 0.0;
        order.recalculate_totals();
        self.store.put_order(&txn, &order)?;
        self.store
            .append_timeline(&txn, &order.id, None, "Discount removed.", actor)?;
        txn.commit()?;
        Ok(order)
    }

    /// Cancel an order, restoring stock for every item
    pub fn cancel(&self, order_number: &str, actor: Option<&str>) -> DomainResult<Order> {
        let txn = self.store.begin_write()?;
        let mut order = self.load_order(&txn, order_number)?;
        if !order.status.can_cancel() {
            return Err(DomainError::InvalidState(format!(
                "Order in status {} cannot be cancelled",
                order.status
            )));
        }

        for item in &order.items {
            self.store
                .increment_stock(&txn, &item.product_id, item.quantity)?
                .ok_or_else(|| DomainError::NotFound(format!("Product {}", item.product_id)))?;
        }

        order.status = OrderStatus::Cancelled;
        order.updated_at = shared::util::now_millis();
        self.store.put_order(&txn, &order)?;
        self.store.append_timeline(
            &txn,
            &order.id,
            Some(OrderStatus::Cancelled.as_str()),
            "Order cancelled.",
            actor,
        )?;
        txn.commit()?;

        info!(order_number = %order.order_number, "Order cancelled, stock restored");
        Ok(order)
    }

    /// Append a free-text note to the order timeline
    pub fn add_note(
        &self,
        order_number: &str,
        note: &str,
        actor: Option<&str>,
    ) -> DomainResult<Order> {
        if note.trim().is_empty() {
            return Err(DomainError::Validation("note text is required".to_string()));
        }
        let txn = self.store.begin_write()?;
        let order = self.load_order(&txn, order_number)?;
        self.store
            .append_timeline(&txn, &order.id, None, note.trim(), actor)?;
        txn.commit()?;
        Ok(order)
    }

    pub fn get(&self, order_number: &str) -> DomainResult<Order> {
        self.store
            .order_by_number(order_number)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", order_number)))
    }

    pub fn list(&self) -> DomainResult<Vec<Order>> {
        Ok(self.store.list_orders()?)
    }

    pub fn timeline(&self, order_number: &str) -> DomainResult<Vec<TimelineEvent>> {
        let order = self.get(order_number)?;
        Ok(self.store.timeline_for_order(&order.id)?)
    }

    fn load_order(
        &self,
        txn: &redb::WriteTransaction,
        order_number: &str,
    ) -> DomainResult<Order> {
        self.store
            .order_by_number_txn(txn, order_number)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", order_number)))
    }
}
