//! Payment coordinator
//!
//! Sequences a payment attempt against the gateway and records the outcome
//! verifiably. The flow is two-phase: a `Pending` transaction is committed
//! *before* the gateway is contacted (a crash mid-call leaves an auditable
//! record), the gateway call runs outside any store transaction with an
//! explicit timeout, and a second transaction applies the outcome
//! atomically. A timed-out call leaves the transaction pending with an
//! "outcome unknown" note; the complete/fail operations settle it later.

pub mod gateway;

pub use gateway::{GatewayResponse, MockGateway, PaymentGateway};

use rust_decimal::Decimal;
use shared::money::{to_decimal, to_f64, validate_amount, MONEY_TOLERANCE};
use shared::{DomainError, DomainResult, OrderStatus, TransactionStatus, TransactionType};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::error::Elapsed;
use tracing::{info, warn};

use crate::models::Transaction;
use crate::store::CommerceStore;

pub struct PaymentCoordinator {
    store: CommerceStore,
    gateway: Arc<dyn PaymentGateway>,
    gateway_timeout: Duration,
}

impl PaymentCoordinator {
    pub fn new(
        store: CommerceStore,
        gateway: Arc<dyn PaymentGateway>,
        gateway_timeout: Duration,
    ) -> Self {
        Self {
            store,
            gateway,
            gateway_timeout,
        }
    }

    /// Initiate a payment against an order
    ///
    /// Returns the settled transaction; a gateway decline is a normally
    /// returned `Failed` transaction, not an error.
    pub async fn initiate(
        &self,
        order_number: &str,
        amount: f64,
        currency_code: &str,
        method_details: &str,
        actor: Option<&str>,
    ) -> DomainResult<Transaction> {
        validate_amount(amount)?;

        // Phase 1: reserve the pending record
        let tx_id;
        {
            let txn = self.store.begin_write()?;
            let order = self
                .store
                .order_by_number_txn(&txn, order_number)?
                .ok_or_else(|| DomainError::NotFound(format!("Order {}", order_number)))?;

            match order.status {
                OrderStatus::Pending => {}
                status if status.is_paid() => {
                    return Err(DomainError::AlreadyPaid(format!(
                        "order {} is already paid (status: {})",
                        order_number, status
                    )));
                }
                status => {
                    return Err(DomainError::InvalidState(format!(
                        "cannot pay order {} in status {}",
                        order_number, status
                    )));
                }
            }

            let currency = self
                .store
                .currency_txn(&txn, currency_code)?
                .filter(|c| c.is_active)
                .ok_or_else(|| {
                    DomainError::Validation(format!(
                        "unknown or inactive currency {}",
                        currency_code
                    ))
                })?;

            let existing = self.store.transactions_for_order_txn(&txn, &order.id)?;
            if existing
                .iter()
                .any(|t| t.kind == TransactionType::Payment && t.status.blocks_new_payment())
            {
                return Err(DomainError::DuplicatePayment(format!(
                    "a payment is already pending or successful for order {}",
                    order_number
                )));
            }

            let tx = Transaction::pending_payment(&order.id, amount, &currency.code, method_details);
            self.store.put_transaction(&txn, &tx)?;
            self.store.append_timeline(
                &txn,
                &order.id,
                None,
                format!("Payment initiated. Amount: {:.2} {}.", amount, currency.code),
                actor,
            )?;
            tx_id = tx.id.clone();
            txn.commit()?;
        }

        // Phase 2: gateway call, bounded, outside any store transaction
        let outcome = tokio::time::timeout(
            self.gateway_timeout,
            self.gateway
                .process_payment(amount, currency_code, method_details),
        )
        .await;

        // Phase 3: finalize
        self.finalize_payment(&tx_id, outcome, actor)
    }

    fn finalize_payment(
        &self,
        tx_id: &str,
        outcome: Result<GatewayResponse, Elapsed>,
        actor: Option<&str>,
    ) -> DomainResult<Transaction> {
        let txn = self.store.begin_write()?;
        let mut tx = self
            .store
            .transaction_txn(&txn, tx_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Transaction {}", tx_id)))?;

        match outcome {
            Ok(response) if response.success => {
                tx.status = TransactionStatus::Successful;
                tx.external_id = response.external_id.clone();
                tx.processed_at = Some(shared::util::now_millis());
                tx.gateway_response_raw = Some(response.raw());
                self.store.put_transaction(&txn, &tx)?;
                self.advance_order_after_payment(&txn, &tx, actor)?;
                info!(
                    transaction = %tx.id,
                    external = tx.external_id.as_deref().unwrap_or(""),
                    "Payment successful"
                );
            }
            Ok(response) => {
                let reason = response
                    .error
                    .clone()
                    .unwrap_or_else(|| "unspecified gateway error".to_string());
                tx.status = TransactionStatus::Failed;
                tx.processed_at = Some(shared::util::now_millis());
                tx.gateway_response_raw = Some(response.raw());
                tx.push_note(&format!("Gateway error: {}", reason));
                self.store.put_transaction(&txn, &tx)?;
                self.store.append_timeline(
                    &txn,
                    &tx.order_id,
                    None,
                    format!("Payment failed. Error: {}", reason),
                    actor,
                )?;
            }
            Err(_) => {
                tx.push_note(&format!(
                    "Gateway call timed out after {}ms; outcome unknown.",
                    self.gateway_timeout.as_millis()
                ));
                self.store.put_transaction(&txn, &tx)?;
                self.store.append_timeline(
                    &txn,
                    &tx.order_id,
                    None,
                    "Payment outcome unknown (gateway timeout).",
                    actor,
                )?;
                warn!(transaction = %tx.id, "Gateway timeout, transaction left pending");
            }
        }

        txn.commit()?;
        Ok(tx)
    }

    /// Refund a successful payment, partially or in full
    ///
    /// The refundable balance counts pending refunds as reserved, so the
    /// cumulative-refund invariant holds even while a refund is in flight at
    /// the gateway.
    pub async fn refund(
        &self,
        transaction_id: &str,
        amount: Option<f64>,
        actor: Option<&str>,
    ) -> DomainResult<Transaction> {
        if let Some(requested) = amount {
            validate_amount(requested)?;
        }

        let refund_id;
        let parent_reference;
        let refund_amount;
        let currency_code;
        {
            let txn = self.store.begin_write()?;
            let parent = self
                .store
                .transaction_txn(&txn, transaction_id)?
                .ok_or_else(|| DomainError::NotFound(format!("Transaction {}", transaction_id)))?;

            if parent.status != TransactionStatus::Successful || !parent.kind.is_refundable() {
                return Err(DomainError::InvalidRefundTarget(
                    "only successful payment or capture transactions can be refunded".to_string(),
                ));
            }

            let children = self.store.children_of_txn(&txn, &parent.id)?;
            let reserved: Decimal = children
                .iter()
                .filter(|c| c.kind == TransactionType::Refund && c.status.reserves_amount())
                .map(|c| to_decimal(c.amount))
                .sum();
            let remaining = to_decimal(parent.amount) - reserved;
            if remaining <= Decimal::ZERO {
                return Err(DomainError::InvalidAmount(
                    "transaction is already fully refunded".to_string(),
                ));
            }

            let requested = match amount {
                Some(value) => to_decimal(value),
                None => remaining,
            };
            if requested > remaining + MONEY_TOLERANCE {
                return Err(DomainError::InvalidAmount(format!(
                    "requested refund {:.2} exceeds refundable balance {:.2}",
                    to_f64(requested),
                    to_f64(remaining)
                )));
            }

            let tx = Transaction::pending_refund(&parent, to_f64(requested));
            self.store.put_transaction(&txn, &tx)?;
            self.store.append_timeline(
                &txn,
                &parent.order_id,
                None,
                format!(
                    "Refund initiated. Amount: {:.2} {}.",
                    tx.amount, tx.currency_code
                ),
                actor,
            )?;

            refund_id = tx.id.clone();
            parent_reference = parent
                .external_id
                .clone()
                .unwrap_or_else(|| parent.id.clone());
            refund_amount = tx.amount;
            currency_code = tx.currency_code.clone();
            txn.commit()?;
        }

        let outcome = tokio::time::timeout(
            self.gateway_timeout,
            self.gateway
                .process_refund(&parent_reference, refund_amount, &currency_code),
        )
        .await;

        self.finalize_refund(&refund_id, outcome, actor)
    }

    fn finalize_refund(
        &self,
        tx_id: &str,
        outcome: Result<GatewayResponse, Elapsed>,
        actor: Option<&str>,
    ) -> DomainResult<Transaction> {
        let txn = self.store.begin_write()?;
        let mut tx = self
            .store
            .transaction_txn(&txn, tx_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Transaction {}", tx_id)))?;

        match outcome {
            Ok(response) if response.success => {
                tx.status = TransactionStatus::Successful;
                tx.external_id = response.external_id.clone();
                tx.processed_at = Some(shared::util::now_millis());
                tx.gateway_response_raw = Some(response.raw());
                self.store.put_transaction(&txn, &tx)?;
                self.apply_refund_state(&txn, &tx, actor)?;
                info!(transaction = %tx.id, amount = tx.amount, "Refund successful");
            }
            Ok(response) => {
                let reason = response
                    .error
                    .clone()
                    .unwrap_or_else(|| "unspecified gateway error".to_string());
                tx.status = TransactionStatus::Failed;
                tx.processed_at = Some(shared::util::now_millis());
                tx.gateway_response_raw = Some(response.raw());
                tx.push_note(&format!("Gateway refund error: {}", reason));
                self.store.put_transaction(&txn, &tx)?;
                self.store.append_timeline(
                    &txn,
                    &tx.order_id,
                    None,
                    format!("Refund failed. Error: {}", reason),
                    actor,
                )?;
            }
            Err(_) => {
                tx.push_note(&format!(
                    "Gateway call timed out after {}ms; outcome unknown.",
                    self.gateway_timeout.as_millis()
                ));
                self.store.put_transaction(&txn, &tx)?;
                self.store.append_timeline(
                    &txn,
                    &tx.order_id,
                    None,
                    "Refund outcome unknown (gateway timeout).",
                    actor,
                )?;
                warn!(transaction = %tx.id, "Gateway timeout, refund left pending");
            }
        }

        txn.commit()?;
        Ok(tx)
    }

    /// Settle a pending transaction as successful (gateway callback path)
    pub fn complete(&self, transaction_id: &str, actor: Option<&str>) -> DomainResult<Transaction> {
        let txn = self.store.begin_write()?;
        let mut tx = self
            .store
            .transaction_txn(&txn, transaction_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Transaction {}", transaction_id)))?;

        if !matches!(
            tx.status,
            TransactionStatus::Pending | TransactionStatus::RequiresAction
        ) {
            return Err(DomainError::InvalidState(format!(
                "transaction is not in a pending state (status: {})",
                tx.status.as_str()
            )));
        }

        tx.status = TransactionStatus::Successful;
        tx.processed_at = Some(shared::util::now_millis());
        self.store.put_transaction(&txn, &tx)?;

        match tx.kind {
            TransactionType::Refund => self.apply_refund_state(&txn, &tx, actor)?,
            _ => self.advance_order_after_payment(&txn, &tx, actor)?,
        }

        txn.commit()?;
        Ok(tx)
    }

    /// Settle a pending transaction as failed (gateway callback path)
    pub fn fail(&self, transaction_id: &str, actor: Option<&str>) -> DomainResult<Transaction> {
        let txn = self.store.begin_write()?;
        let mut tx = self
            .store
            .transaction_txn(&txn, transaction_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Transaction {}", transaction_id)))?;

        if !matches!(
            tx.status,
            TransactionStatus::Pending | TransactionStatus::RequiresAction
        ) {
            return Err(DomainError::InvalidState(format!(
                "transaction is not in a pending state (status: {})",
                tx.status.as_str()
            )));
        }

        tx.status = TransactionStatus::Failed;
        tx.processed_at = Some(shared::util::now_millis());
        self.store.put_transaction(&txn, &tx)?;
        self.store.append_timeline(
            &txn,
            &tx.order_id,
            None,
            format!(
                "{} failed for TxID: {}.",
                if tx.kind == TransactionType::Refund {
                    "Refund"
                } else {
                    "Payment"
                },
                tx.external_id.as_deref().unwrap_or(&tx.id)
            ),
            actor,
        )?;
        txn.commit()?;
        Ok(tx)
    }

    pub fn get(&self, transaction_id: &str) -> DomainResult<Transaction> {
        self.store
            .transaction(transaction_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Transaction {}", transaction_id)))
    }

    pub fn list_for_order(&self, order_number: &str) -> DomainResult<Vec<Transaction>> {
        let order = self
            .store
            .order_by_number(order_number)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", order_number)))?;
        Ok(self.store.transactions_for_order(&order.id)?)
    }

    /// Successful payment advances a pending order to processing
    fn advance_order_after_payment(
        &self,
        txn: &redb::WriteTransaction,
        tx: &Transaction,
        actor: Option<&str>,
    ) -> DomainResult<()> {
        let mut order = self
            .store
            .order_txn(txn, &tx.order_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", tx.order_id)))?;

        let reference = tx.external_id.as_deref().unwrap_or(&tx.id).to_string();
        if order.status == OrderStatus::Pending {
            order.status = OrderStatus::Processing;
            order.updated_at = shared::util::now_millis();
            self.store.put_order(txn, &order)?;
            self.store.append_timeline(
                txn,
                &order.id,
                Some(OrderStatus::Processing.as_str()),
                format!("Payment successful. Transaction ID: {}.", reference),
                actor,
            )?;
        } else {
            self.store.append_timeline(
                txn,
                &order.id,
                None,
                format!("Payment successful. Transaction ID: {}.", reference),
                actor,
            )?;
        }
        Ok(())
    }

    /// Persist the order's refund state after a successful refund
    ///
    /// Cumulative successful refunds are compared against the order total:
    /// fully covered → `Refunded`, otherwise → `PartiallyRefunded`.
    fn apply_refund_state(
        &self,
        txn: &redb::WriteTransaction,
        tx: &Transaction,
        actor: Option<&str>,
    ) -> DomainResult<()> {
        let parent_id = tx.parent_id.as_deref().ok_or_else(|| {
            DomainError::InvalidRefundTarget("refund has no parent transaction".to_string())
        })?;

        let refunded: Decimal = self
            .store
            .children_of_txn(txn, parent_id)?
            .iter()
            .filter(|c| {
                c.kind == TransactionType::Refund && c.status == TransactionStatus::Successful
            })
            .map(|c| to_decimal(c.amount))
            .sum();

        let mut order = self
            .store
            .order_txn(txn, &tx.order_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", tx.order_id)))?;

        let new_status = if refunded + MONEY_TOLERANCE >= to_decimal(order.total_amount) {
            OrderStatus::Refunded
        } else {
            OrderStatus::PartiallyRefunded
        };
        order.status = new_status;
        order.updated_at = shared::util::now_millis();
        self.store.put_order(txn, &order)?;
        self.store.append_timeline(
            txn,
            &order.id,
            Some(new_status.as_str()),
            format!(
                "Refund successful. Amount: {:.2} {}. Refund TxID: {}.",
                tx.amount,
                tx.currency_code,
                tx.external_id.as_deref().unwrap_or(&tx.id)
            ),
            actor,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductCreate};
    use crate::orders::{CouponBook, OrderService};
    use shared::{CreateOrderInput, OrderItemInput};

    const TEST_TIMEOUT: Duration = Duration::from_secs(2);

    struct SlowGateway;

    #[async_trait::async_trait]
    impl PaymentGateway for SlowGateway {
        async fn process_payment(&self, _: f64, _: &str, _: &str) -> GatewayResponse {
            tokio::time::sleep(Duration::from_secs(30)).await;
            GatewayResponse::approved("MOCK_GW_SLOW".to_string())
        }

        async fn process_refund(&self, _: &str, _: f64, _: &str) -> GatewayResponse {
            tokio::time::sleep(Duration::from_secs(30)).await;
            GatewayResponse::approved("MOCK_REF_SLOW".to_string())
        }
    }

    fn setup() -> (CommerceStore, String) {
        let store = CommerceStore::open_in_memory().unwrap();
        store.ensure_default_currencies().unwrap();
        let product = Product::new(
            ProductCreate {
                name: "Product A".to_string(),
                description: None,
                price: 10.0,
                stock: 5,
                available: None,
            },
            "product-a".to_string(),
        );
        let txn = store.begin_write().unwrap();
        store.put_product(&txn, &product).unwrap();
        txn.commit().unwrap();
        (store, product.id)
    }

    fn place_order(store: &CommerceStore, product_id: &str, quantity: u32) -> String {
        let orders = OrderService::new(store.clone(), CouponBook::default());
        let order = orders
            .create(
                CreateOrderInput {
                    user_id: Some("user-1".to_string()),
                    email: None,
                    items: vec![OrderItemInput {
                        product_id: product_id.to_string(),
                        quantity,
                    }],
                    notes: None,
                },
                None,
            )
            .unwrap();
        order.order_number
    }

    fn coordinator(store: &CommerceStore) -> PaymentCoordinator {
        PaymentCoordinator::new(store.clone(), Arc::new(MockGateway), TEST_TIMEOUT)
    }

    #[tokio::test]
    async fn test_successful_payment_advances_order() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let payments = coordinator(&store);

        let tx = payments
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await
            .unwrap();

        assert_eq!(tx.status, TransactionStatus::Successful);
        assert!(tx.external_id.unwrap().starts_with("MOCK_GW_"));
        assert!(tx.processed_at.is_some());

        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_declined_payment_is_returned_not_raised() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let payments = coordinator(&store);

        let tx = payments
            .initiate(&order_number, 20.0, "USD", "card will fail", None)
            .await
            .unwrap();

        assert_eq!(tx.status, TransactionStatus::Failed);
        assert!(tx.notes.unwrap().contains("Gateway error"));

        // Order status unchanged, and a failed attempt does not block a retry
        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        let retry = payments
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await
            .unwrap();
        assert_eq!(retry.status, TransactionStatus::Successful);
    }

    #[tokio::test]
    async fn test_duplicate_payment_rejected() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let payments = coordinator(&store);

        // A paid order refuses a second attempt before the duplicate check
        payments
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await
            .unwrap();
        let again = payments
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await;
        assert!(matches!(again, Err(DomainError::AlreadyPaid(_))));
    }

    #[tokio::test]
    async fn test_pending_transaction_blocks_second_payment() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);

        // Timeout leaves the first attempt pending
        let slow = PaymentCoordinator::new(
            store.clone(),
            Arc::new(SlowGateway),
            Duration::from_millis(20),
        );
        let tx = slow
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await
            .unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.notes.unwrap().contains("outcome unknown"));

        let payments = coordinator(&store);
        let second = payments
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await;
        assert!(matches!(second, Err(DomainError::DuplicatePayment(_))));

        // Callback settles the stuck transaction and advances the order
        let settled = payments.complete(&tx.id, None).unwrap();
        assert_eq!(settled.status, TransactionStatus::Successful);
        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_unknown_currency_rejected() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let payments = coordinator(&store);

        let result = payments
            .initiate(&order_number, 20.0, "XXX", "Visa ending in 4242", None)
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_partial_refund_tracks_remaining_balance() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let payments = coordinator(&store);
        let payment = payments
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await
            .unwrap();

        let refund = payments
            .refund(&payment.id, Some(15.0), None)
            .await
            .unwrap();
        assert_eq!(refund.status, TransactionStatus::Successful);
        assert!(refund.external_id.unwrap().starts_with("MOCK_REF_"));

        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::PartiallyRefunded);

        // Remaining was 5.00: asking for 10.00 more must fail
        let too_much = payments.refund(&payment.id, Some(10.0), None).await;
        assert!(matches!(too_much, Err(DomainError::InvalidAmount(_))));

        // Refunding the exact remainder flips the order to refunded
        let rest = payments.refund(&payment.id, None, None).await.unwrap();
        assert_eq!(rest.amount, 5.0);
        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Refunded);

        // Nothing left to refund
        let empty = payments.refund(&payment.id, None, None).await;
        assert!(matches!(empty, Err(DomainError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_refund_requires_successful_parent() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let payments = coordinator(&store);

        let failed = payments
            .initiate(&order_number, 20.0, "USD", "fail this one", None)
            .await
            .unwrap();
        assert_eq!(failed.status, TransactionStatus::Failed);

        let result = payments.refund(&failed.id, None, None).await;
        assert!(matches!(result, Err(DomainError::InvalidRefundTarget(_))));
    }

    #[tokio::test]
    async fn test_refund_of_refund_rejected() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let payments = coordinator(&store);
        let payment = payments
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await
            .unwrap();
        let refund = payments.refund(&payment.id, Some(5.0), None).await.unwrap();

        let result = payments.refund(&refund.id, None, None).await;
        assert!(matches!(result, Err(DomainError::InvalidRefundTarget(_))));
    }

    #[tokio::test]
    async fn test_fail_callback_settles_pending() {
        let (store, product_id) = setup();
        let order_number = place_order(&store, &product_id, 2);
        let slow = PaymentCoordinator::new(
            store.clone(),
            Arc::new(SlowGateway),
            Duration::from_millis(20),
        );
        let tx = slow
            .initiate(&order_number, 20.0, "USD", "Visa ending in 4242", None)
            .await
            .unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);

        let payments = coordinator(&store);
        let failed = payments.fail(&tx.id, Some("ops")).unwrap();
        assert_eq!(failed.status, TransactionStatus::Failed);

        // A settled transaction cannot be settled again
        assert!(matches!(
            payments.complete(&tx.id, None),
            Err(DomainError::InvalidState(_))
        ));
        assert!(matches!(
            payments.fail(&tx.id, None),
            Err(DomainError::InvalidState(_))
        ));

        // Order stayed pending and accepts a fresh attempt
        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
