//! Shipment coordinator
//!
//! Tracks physical fulfilment per order through a linear status progression,
//! one shipment per order. Cancelling a shipment never touches inventory;
//! stock restoration belongs to order cancellation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::money::validate_price;
use shared::{DomainError, DomainResult, OrderStatus, ShipmentStatus};
use tracing::info;

use crate::models::Shipment;
use crate::store::CommerceStore;

/// Input for processing a pending shipment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessShipmentInput {
    pub carrier_id: Option<String>,
    pub tracking_number: Option<String>,
    /// Target status; defaults to `READY_TO_SHIP`
    pub status: Option<String>,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub shipping_cost: Option<f64>,
}

pub struct ShipmentCoordinator {
    store: CommerceStore,
}

impl ShipmentCoordinator {
    pub fn new(store: CommerceStore) -> Self {
        Self { store }
    }

    /// Create the shipment for an order (at most one per order)
    ///
    /// A pending order advances to processing as a side effect.
    pub fn create_for_order(
        &self,
        order_number: &str,
        actor: Option<&str>,
    ) -> DomainResult<Shipment> {
        let txn = self.store.begin_write()?;
        let mut order = self
            .store
            .order_by_number_txn(&txn, order_number)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", order_number)))?;

        if let Some(existing) = self.store.shipment_id_for_order_txn(&txn, &order.id)? {
            return Err(DomainError::AlreadyExists(format!(
                "order {} already has shipment {}",
                order_number, existing
            )));
        }

        let shipment = Shipment::new(&order.id);
        self.store.put_shipment(&txn, &shipment)?;
        self.store.append_timeline(
            &txn,
            &order.id,
            None,
            format!("Shipment created with ID {}.", shipment.id),
            actor,
        )?;

        if order.status == OrderStatus::Pending {
            order.status = OrderStatus::Processing;
            order.updated_at = shared::util::now_millis();
            self.store.put_order(&txn, &order)?;
            self.store.append_timeline(
                &txn,
                &order.id,
                Some(OrderStatus::Processing.as_str()),
                "Order status changed to processing due to shipment creation.",
                actor,
            )?;
        }

        txn.commit()?;
        info!(order_number = %order.order_number, shipment = %shipment.id, "Shipment created");
        Ok(shipment)
    }

    /// Process a pending shipment: assign carrier/tracking, move it forward
    pub fn process(
        &self,
        shipment_id: &str,
        input: ProcessShipmentInput,
        actor: Option<&str>,
    ) -> DomainResult<Shipment> {
        if let Some(cost) = input.shipping_cost {
            validate_price(cost)?;
        }
        let target = match &input.status {
            Some(value) => ShipmentStatus::parse(value).ok_or_else(|| {
                DomainError::InvalidStatus(format!("unrecognized shipment status {}", value))
            })?,
            None => ShipmentStatus::ReadyToShip,
        };

        let txn = self.store.begin_write()?;
        let mut shipment = self
            .store
            .shipment_txn(&txn, shipment_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Shipment {}", shipment_id)))?;

        if shipment.status != ShipmentStatus::Pending {
            return Err(DomainError::InvalidState(format!(
                "shipment must be pending to be processed (status: {})",
                shipment.status
            )));
        }

        let carrier_id = input
            .carrier_id
            .or_else(|| shipment.carrier_id.clone())
            .ok_or_else(|| {
                DomainError::MissingCarrier(
                    "a carrier must be assigned to process the shipment".to_string(),
                )
            })?;
        let carrier = self
            .store
            .carrier_txn(&txn, &carrier_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Carrier {}", carrier_id)))?;

        shipment.carrier_id = Some(carrier.id.clone());
        if input.tracking_number.is_some() {
            shipment.tracking_number = input.tracking_number;
        }
        if input.estimated_delivery_date.is_some() {
            shipment.estimated_delivery_date = input.estimated_delivery_date;
        }
        if input.shipping_cost.is_some() {
            shipment.shipping_cost = input.shipping_cost;
        }

        self.apply_side_effects(&txn, &mut shipment, target, actor)?;
        shipment.status = target;
        self.store.put_shipment(&txn, &shipment)?;
        self.store.append_timeline(
            &txn,
            &shipment.order_id,
            Some(target.as_str()),
            format!(
                "Shipment processed. Carrier: {}. Tracking: {}. Status: {}",
                carrier.name,
                shipment.tracking_number.as_deref().unwrap_or("N/A"),
                target
            ),
            actor,
        )?;
        txn.commit()?;
        Ok(shipment)
    }

    /// Move a shipment to a new status
    ///
    /// `shipped` stamps `shipped_at` exactly once; `delivered` stamps the
    /// actual delivery date exactly once and cascades the order to
    /// delivered. Repeating a transition never overwrites either stamp.
    pub fn update_status(
        &self,
        shipment_id: &str,
        new_status: &str,
        actor: Option<&str>,
    ) -> DomainResult<Shipment> {
        let target = ShipmentStatus::parse(new_status).ok_or_else(|| {
            DomainError::InvalidStatus(format!("unrecognized shipment status {}", new_status))
        })?;

        let txn = self.store.begin_write()?;
        let mut shipment = self
            .store
            .shipment_txn(&txn, shipment_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Shipment {}", shipment_id)))?;

        if shipment.status.is_terminal() && shipment.status != target {
            return Err(DomainError::InvalidState(format!(
                "shipment in status {} accepts no further transitions",
                shipment.status
            )));
        }

        let previous = shipment.status;
        self.apply_side_effects(&txn, &mut shipment, target, actor)?;
        shipment.status = target;
        self.store.put_shipment(&txn, &shipment)?;
        self.store.append_timeline(
            &txn,
            &shipment.order_id,
            Some(target.as_str()),
            format!(
                "Shipment status changed from {} to {}. Tracking: {}",
                previous,
                target,
                shipment.tracking_number.as_deref().unwrap_or("N/A")
            ),
            actor,
        )?;
        txn.commit()?;
        Ok(shipment)
    }

    /// Cancel a shipment that has not left the warehouse
    pub fn cancel(&self, shipment_id: &str, actor: Option<&str>) -> DomainResult<Shipment> {
        let txn = self.store.begin_write()?;
        let mut shipment = self
            .store
            .shipment_txn(&txn, shipment_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Shipment {}", shipment_id)))?;

        if !shipment.status.can_cancel() {
            return Err(DomainError::InvalidState(format!(
                "Shipment in status {} cannot be cancelled",
                shipment.status
            )));
        }

        let previous = shipment.status;
        shipment.status = ShipmentStatus::Cancelled;
        self.store.put_shipment(&txn, &shipment)?;
        self.store.append_timeline(
            &txn,
            &shipment.order_id,
            Some(ShipmentStatus::Cancelled.as_str()),
            format!("Shipment cancelled. Was in status: {}.", previous),
            actor,
        )?;
        txn.commit()?;
        Ok(shipment)
    }

    pub fn get(&self, shipment_id: &str) -> DomainResult<Shipment> {
        self.store
            .shipment(shipment_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Shipment {}", shipment_id)))
    }

    pub fn list(&self) -> DomainResult<Vec<Shipment>> {
        Ok(self.store.list_shipments()?)
    }

    /// Status-specific side effects: write-once stamps and order cascades
    fn apply_side_effects(
        &self,
        txn: &redb::WriteTransaction,
        shipment: &mut Shipment,
        target: ShipmentStatus,
        actor: Option<&str>,
    ) -> DomainResult<()> {
        match target {
            ShipmentStatus::Shipped => {
                if shipment.shipped_at.is_none() {
                    shipment.shipped_at = Some(shared::util::now_millis());
                }
                let mut order = self
                    .store
                    .order_txn(txn, &shipment.order_id)?
                    .ok_or_else(|| DomainError::NotFound(format!("Order {}", shipment.order_id)))?;
                if order.status == OrderStatus::Processing {
                    order.status = OrderStatus::Shipped;
                    order.updated_at = shared::util::now_millis();
                    self.store.put_order(txn, &order)?;
                    self.store.append_timeline(
                        txn,
                        &order.id,
                        Some(OrderStatus::Shipped.as_str()),
                        "Order marked as shipped.",
                        actor,
                    )?;
                }
            }
            ShipmentStatus::Delivered => {
                if shipment.actual_delivery_date.is_none() {
                    shipment.actual_delivery_date = Some(shared::util::today());
                }
                let mut order = self
                    .store
                    .order_txn(txn, &shipment.order_id)?
                    .ok_or_else(|| DomainError::NotFound(format!("Order {}", shipment.order_id)))?;
                if order.status != OrderStatus::Delivered {
                    order.status = OrderStatus::Delivered;
                    order.updated_at = shared::util::now_millis();
                    self.store.put_order(txn, &order)?;
                    self.store.append_timeline(
                        txn,
                        &order.id,
                        Some(OrderStatus::Delivered.as_str()),
                        "Order marked as delivered.",
                        actor,
                    )?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Carrier, CarrierCreate, Product, ProductCreate};
    use crate::orders::{CouponBook, OrderService};
    use shared::{CreateOrderInput, OrderItemInput};

    fn setup() -> (CommerceStore, String, String) {
        let store = CommerceStore::open_in_memory().unwrap();
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
        let carrier = Carrier::new(CarrierCreate {
            name: "Royal Mail".to_string(),
            tracking_url_template: None,
        });
        let txn = store.begin_write().unwrap();
        store.put_product(&txn, &product).unwrap();
        store.put_carrier(&txn, &carrier).unwrap();
        txn.commit().unwrap();

        let orders = OrderService::new(store.clone(), CouponBook::default());
        let order = orders
            .create(
                CreateOrderInput {
                    user_id: Some("user-1".to_string()),
                    email: None,
                    items: vec![OrderItemInput {
                        product_id: product.id.clone(),
                        quantity: 2,
                    }],
                    notes: None,
                },
                None,
            )
            .unwrap();

        (store, order.order_number, carrier.id)
    }

    #[test]
    fn test_create_for_order_advances_pending_order() {
        let (store, order_number, _) = setup();
        let shipments = ShipmentCoordinator::new(store.clone());

        let shipment = shipments.create_for_order(&order_number, None).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::Pending);

        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn test_second_shipment_for_order_rejected() {
        let (store, order_number, _) = setup();
        let shipments = ShipmentCoordinator::new(store);

        shipments.create_for_order(&order_number, None).unwrap();
        let second = shipments.create_for_order(&order_number, None);
        assert!(matches!(second, Err(DomainError::AlreadyExists(_))));
    }

    #[test]
    fn test_create_for_missing_order() {
        let (store, _, _) = setup();
        let shipments = ShipmentCoordinator::new(store);
        let result = shipments.create_for_order("ORD-MISSING1", None);
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_process_requires_carrier() {
        let (store, order_number, carrier_id) = setup();
        let shipments = ShipmentCoordinator::new(store);
        let shipment = shipments.create_for_order(&order_number, None).unwrap();

        let no_carrier = shipments.process(&shipment.id, ProcessShipmentInput::default(), None);
        assert!(matches!(no_carrier, Err(DomainError::MissingCarrier(_))));

        let unknown = shipments.process(
            &shipment.id,
            ProcessShipmentInput {
                carrier_id: Some("no-such-carrier".to_string()),
                ..Default::default()
            },
            None,
        );
        assert!(matches!(unknown, Err(DomainError::NotFound(_))));

        let processed = shipments
            .process(
                &shipment.id,
                ProcessShipmentInput {
                    carrier_id: Some(carrier_id),
                    tracking_number: Some("RM123456789GB".to_string()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(processed.status, ShipmentStatus::ReadyToShip);
        assert_eq!(processed.tracking_number.as_deref(), Some("RM123456789GB"));

        // A processed shipment cannot be processed again
        let again = shipments.process(&processed.id, ProcessShipmentInput::default(), None);
        assert!(matches!(again, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn test_update_status_rejects_unrecognized_value() {
        let (store, order_number, _) = setup();
        let shipments = ShipmentCoordinator::new(store);
        let shipment = shipments.create_for_order(&order_number, None).unwrap();

        let result = shipments.update_status(&shipment.id, "TELEPORTED", None);
        assert!(matches!(result, Err(DomainError::InvalidStatus(_))));
    }

    #[test]
    fn test_shipped_at_is_set_exactly_once() {
        let (store, order_number, carrier_id) = setup();
        let shipments = ShipmentCoordinator::new(store.clone());
        let shipment = shipments.create_for_order(&order_number, None).unwrap();
        shipments
            .process(
                &shipment.id,
                ProcessShipmentInput {
                    carrier_id: Some(carrier_id),
                    ..Default::default()
                },
                None,
            )
            .unwrap();

        let first = shipments
            .update_status(&shipment.id, "SHIPPED", None)
            .unwrap();
        let stamp = first.shipped_at.unwrap();

        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);

        // Idempotent: repeating the transition keeps the original stamp
        let second = shipments
            .update_status(&shipment.id, "SHIPPED", None)
            .unwrap();
        assert_eq!(second.shipped_at.unwrap(), stamp);
    }

    #[test]
    fn test_delivered_cascades_to_order() {
        let (store, order_number, carrier_id) = setup();
        let shipments = ShipmentCoordinator::new(store.clone());
        let shipment = shipments.create_for_order(&order_number, None).unwrap();
        shipments
            .process(
                &shipment.id,
                ProcessShipmentInput {
                    carrier_id: Some(carrier_id),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        shipments
            .update_status(&shipment.id, "SHIPPED", None)
            .unwrap();

        let delivered = shipments
            .update_status(&shipment.id, "DELIVERED", None)
            .unwrap();
        assert_eq!(delivered.actual_delivery_date, Some(shared::util::today()));

        let order = store.order_by_number(&order_number).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);

        // Delivered is terminal
        let result = shipments.update_status(&shipment.id, "IN_TRANSIT", None);
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn test_cancel_gates_on_status() {
        let (store, order_number, _) = setup();
        let shipments = ShipmentCoordinator::new(store);
        let shipment = shipments.create_for_order(&order_number, None).unwrap();

        let cancelled = shipments.cancel(&shipment.id, None).unwrap();
        assert_eq!(cancelled.status, ShipmentStatus::Cancelled);

        let again = shipments.cancel(&shipment.id, None);
        assert!(matches!(again, Err(DomainError::InvalidState(_))));
    }

    #[test]
    fn test_shipped_shipment_refuses_cancellation() {
        let (store, order_number, carrier_id) = setup();
        let shipments = ShipmentCoordinator::new(store);
        let shipment = shipments.create_for_order(&order_number, None).unwrap();
        shipments
            .process(
                &shipment.id,
                ProcessShipmentInput {
                    carrier_id: Some(carrier_id),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        shipments
            .update_status(&shipment.id, "SHIPPED", None)
            .unwrap();

        let result = shipments.cancel(&shipment.id, None);
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
    }
}
