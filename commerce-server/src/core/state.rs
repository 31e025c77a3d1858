//! Application state
//!
//! Holds the shared handles every request needs: the embedded store, the
//! payment gateway, and the coupon book. Cloning is shallow (`Arc` inside).

use std::sync::Arc;

use crate::core::Config;
use crate::orders::{CouponBook, OrderService};
use crate::payments::{MockGateway, PaymentCoordinator, PaymentGateway};
use crate::shipping::ShipmentCoordinator;
use crate::store::CommerceStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: CommerceStore,
    pub gateway: Arc<dyn PaymentGateway>,
    pub coupons: CouponBook,
}

impl AppState {
    /// Open the store under the configured work dir and wire the defaults
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let db_path = std::path::Path::new(&config.work_dir).join("commerce.redb");
        let store = CommerceStore::open(db_path)?;
        store.ensure_default_currencies()?;

        Ok(Self {
            config: config.clone(),
            store,
            gateway: Arc::new(MockGateway),
            coupons: CouponBook::from_spec(&config.coupon_codes),
        })
    }

    /// State over an in-memory store (tests, demos)
    pub fn in_memory(config: Config) -> anyhow::Result<Self> {
        let store = CommerceStore::open_in_memory()?;
        store.ensure_default_currencies()?;
        Ok(Self {
            store,
            gateway: Arc::new(MockGateway),
            coupons: CouponBook::from_spec(&config.coupon_codes),
            config,
        })
    }

    // Coordinators are cheap request-scoped facades over the shared store

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.store.clone(), self.coupons.clone())
    }

    pub fn payments(&self) -> PaymentCoordinator {
        PaymentCoordinator::new(
            self.store.clone(),
            self.gateway.clone(),
            self.config.gateway_timeout(),
        )
    }

    pub fn shipments(&self) -> ShipmentCoordinator {
        ShipmentCoordinator::new(self.store.clone())
    }
}
