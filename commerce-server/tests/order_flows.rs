//! End-to-end order lifecycle flows
//!
//! Drives the real coordinators over an in-memory store with the mock
//! gateway: create → pay → ship → deliver, plus the cancellation and refund
//! branches and their invariants.

use commerce_server::models::{Carrier, CarrierCreate, Product, ProductCreate};
use commerce_server::{AppState, Config, ProcessShipmentInput};
use shared::money::line_total;
use shared::{
    CreateOrderInput, DomainError, OrderItemInput, OrderStatus, ShipmentStatus, TransactionStatus,
};

fn test_config() -> Config {
    Config {
        work_dir: "./data".to_string(),
        http_port: 0,
        environment: "test".to_string(),
        log_level: "warn".to_string(),
        gateway_timeout_ms: 2_000,
        coupon_codes: "DISCOUNT10:0.10".to_string(),
    }
}

fn state_with_catalog() -> (AppState, String, String) {
    let state = AppState::in_memory(test_config()).unwrap();

    let a = Product::new(
        ProductCreate {
            name: "Product A".to_string(),
            description: None,
            price: 10.0,
            stock: 5,
            available: None,
        },
        "product-a".to_string(),
    );
    let b = Product::new(
        ProductCreate {
            name: "Product B".to_string(),
            description: None,
            price: 7.5,
            stock: 8,
            available: None,
        },
        "product-b".to_string(),
    );
    let txn = state.store.begin_write().unwrap();
    state.store.put_product(&txn, &a).unwrap();
    state.store.put_product(&txn, &b).unwrap();
    txn.commit().unwrap();

    (state, a.id, b.id)
}

fn place_order(state: &AppState, lines: Vec<(String, u32)>) -> commerce_server::models::Order {
    state
        .orders()
        .create(
            CreateOrderInput {
                user_id: Some("user-1".to_string()),
                email: None,
                items: lines
                    .into_iter()
                    .map(|(product_id, quantity)| OrderItemInput {
                        product_id,
                        quantity,
                    })
                    .collect(),
                notes: None,
            },
            None,
        )
        .unwrap()
}

/// Scenario: create order with 2×A (stock 5, price 10.00)
#[test]
fn order_creation_decrements_stock_and_derives_totals() {
    let (state, a, _) = state_with_catalog();
    let order = place_order(&state, vec![(a.clone(), 2)]);

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.subtotal_amount, 20.0);
    assert_eq!(order.total_amount, 20.0);
    assert_eq!(state.store.product(&a).unwrap().unwrap().stock, 3);

    // total == subtotal - discount and subtotal == Σ line totals
    let derived: rust_decimal::Decimal = order
        .items
        .iter()
        .map(|i| line_total(i.price_at_purchase, i.quantity))
        .sum();
    assert_eq!(shared::money::to_f64(derived), order.subtotal_amount);
    assert_eq!(
        order.total_amount,
        order.subtotal_amount - order.discount_amount
    );
}

/// Scenario: gateway success moves transaction to SUCCESSFUL, order to PROCESSING
#[tokio::test]
async fn payment_success_advances_order() {
    let (state, a, _) = state_with_catalog();
    let order = place_order(&state, vec![(a, 2)]);

    let tx = state
        .payments()
        .initiate(&order.order_number, 20.0, "USD", "Visa ending in 4242", None)
        .await
        .unwrap();

    assert_eq!(tx.status, TransactionStatus::Successful);
    let order = state.orders().get(&order.order_number).unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
}

/// Scenario: method details containing "fail" leave the order untouched
#[tokio::test]
async fn payment_failure_keeps_order_pending() {
    let (state, a, _) = state_with_catalog();
    let order = place_order(&state, vec![(a, 2)]);

    let tx = state
        .payments()
        .initiate(&order.order_number, 20.0, "USD", "this card will fail", None)
        .await
        .unwrap();

    assert_eq!(tx.status, TransactionStatus::Failed);
    let order = state.orders().get(&order.order_number).unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
}

/// Scenario: refund 15 of a 20 payment, then attempt 10 more
#[tokio::test]
async fn cumulative_refunds_never_exceed_parent_amount() {
    let (state, a, _) = state_with_catalog();
    let order = place_order(&state, vec![(a, 2)]);
    let payments = state.payments();
    let payment = payments
        .initiate(&order.order_number, 20.0, "USD", "Visa ending in 4242", None)
        .await
        .unwrap();

    let refund = payments.refund(&payment.id, Some(15.0), None).await.unwrap();
    assert_eq!(refund.status, TransactionStatus::Successful);

    let second = payments.refund(&payment.id, Some(10.0), None).await;
    assert!(matches!(second, Err(DomainError::InvalidAmount(_))));

    // Refund state is persisted on the order
    let order = state.orders().get(&order.order_number).unwrap();
    assert_eq!(order.status, OrderStatus::PartiallyRefunded);
}

/// Scenario: cancelling a processing order restores stock for both items
#[tokio::test]
async fn cancel_restores_stock_and_rejects_repeat() {
    let (state, a, b) = state_with_catalog();
    let order = place_order(&state, vec![(a.clone(), 2), (b.clone(), 3)]);
    state
        .payments()
        .initiate(&order.order_number, order.total_amount, "USD", "visa", None)
        .await
        .unwrap();
    assert_eq!(
        state.orders().get(&order.order_number).unwrap().status,
        OrderStatus::Processing
    );

    let cancelled = state.orders().cancel(&order.order_number, None).unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(state.store.product(&a).unwrap().unwrap().stock, 5);
    assert_eq!(state.store.product(&b).unwrap().unwrap().stock, 8);

    let again = state.orders().cancel(&order.order_number, None);
    assert!(matches!(again, Err(DomainError::InvalidState(_))));
}

/// Scenario: a second shipment for the same order is rejected
#[test]
fn one_shipment_per_order() {
    let (state, a, _) = state_with_catalog();
    let order = place_order(&state, vec![(a, 1)]);

    state
        .shipments()
        .create_for_order(&order.order_number, None)
        .unwrap();
    let second = state.shipments().create_for_order(&order.order_number, None);
    assert!(matches!(second, Err(DomainError::AlreadyExists(_))));
}

/// Full happy path: create → pay → ship → deliver, timeline in call order
#[tokio::test]
async fn full_lifecycle_reaches_delivered() {
    let (state, a, _) = state_with_catalog();
    let order = place_order(&state, vec![(a, 2)]);

    state
        .payments()
        .initiate(&order.order_number, 20.0, "USD", "Visa ending in 4242", None)
        .await
        .unwrap();

    let carrier = {
        let carrier = Carrier::new(CarrierCreate {
            name: "DHL Express".to_string(),
            tracking_url_template: None,
        });
        let txn = state.store.begin_write().unwrap();
        state.store.put_carrier(&txn, &carrier).unwrap();
        txn.commit().unwrap();
        carrier
    };

    let shipments = state.shipments();
    let shipment = shipments
        .create_for_order(&order.order_number, None)
        .unwrap();
    shipments
        .process(
            &shipment.id,
            ProcessShipmentInput {
                carrier_id: Some(carrier.id),
                tracking_number: Some("DHL00012345".to_string()),
                ..Default::default()
            },
            None,
        )
        .unwrap();

    let shipped = shipments
        .update_status(&shipment.id, "SHIPPED", None)
        .unwrap();
    assert!(shipped.shipped_at.is_some());
    assert_eq!(
        state.orders().get(&order.order_number).unwrap().status,
        OrderStatus::Shipped
    );

    // Idempotence: repeating the transition keeps shipped_at
    let repeated = shipments
        .update_status(&shipment.id, "SHIPPED", None)
        .unwrap();
    assert_eq!(repeated.shipped_at, shipped.shipped_at);

    shipments
        .update_status(&shipment.id, "IN_TRANSIT", None)
        .unwrap();
    let delivered = shipments
        .update_status(&shipment.id, "DELIVERED", None)
        .unwrap();
    assert_eq!(delivered.status, ShipmentStatus::Delivered);
    assert!(delivered.actual_delivery_date.is_some());
    assert_eq!(
        state.orders().get(&order.order_number).unwrap().status,
        OrderStatus::Delivered
    );

    // Timeline events arrive back in call order
    let events = state.orders().timeline(&order.order_number).unwrap();
    assert!(events.len() >= 6);
    assert!(events.windows(2).all(|w| w[0].seq < w[1].seq));
    assert_eq!(events[0].note, "Order created.");
    assert_eq!(
        events.last().unwrap().status.as_deref(),
        Some("DELIVERED")
    );
}

/// Discount applies exactly once and recomputes the payable total
#[test]
fn discount_applies_once_and_total_stays_derived() {
    let (state, a, b) = state_with_catalog();
    let order = place_order(&state, vec![(a, 3), (b, 2)]);
    assert_eq!(order.subtotal_amount, 45.0);

    let order = state
        .orders()
        .apply_discount(&order.order_number, "DISCOUNT10", None)
        .unwrap();
    assert_eq!(order.discount_amount, 4.5);
    assert_eq!(order.total_amount, 40.5);

    let again = state
        .orders()
        .apply_discount(&order.order_number, "DISCOUNT10", None);
    assert!(matches!(again, Err(DomainError::InvalidCoupon(_))));
}

/// A fully refunded order ends in REFUNDED
#[tokio::test]
async fn full_refund_marks_order_refunded() {
    let (state, a, _) = state_with_catalog();
    let order = place_order(&state, vec![(a, 2)]);
    let payments = state.payments();
    let payment = payments
        .initiate(&order.order_number, 20.0, "USD", "Visa ending in 4242", None)
        .await
        .unwrap();

    let refund = payments.refund(&payment.id, None, None).await.unwrap();
    assert_eq!(refund.amount, 20.0);

    let order = state.orders().get(&order.order_number).unwrap();
    assert_eq!(order.status, OrderStatus::Refunded);

    // Terminal: no cancellation after a full refund
    let cancel = state.orders().cancel(&order.order_number, None);
    assert!(matches!(cancel, Err(DomainError::InvalidState(_))));
}

/// Items are frozen once the order leaves PENDING
#[tokio::test]
async fn items_frozen_after_payment() {
    let (state, a, b) = state_with_catalog();
    let order = place_order(&state, vec![(a, 1)]);
    state
        .payments()
        .initiate(&order.order_number, 10.0, "USD", "visa", None)
        .await
        .unwrap();

    let add = state.orders().add_item(&order.order_number, &b, 1, None);
    assert!(matches!(add, Err(DomainError::InvalidState(_))));

    let order = state.orders().get(&order.order_number).unwrap();
    let item_id = order.items[0].id.clone();
    let remove = state
        .orders()
        .remove_item(&order.order_number, &item_id, None, None);
    assert!(matches!(remove, Err(DomainError::InvalidState(_))));
}
