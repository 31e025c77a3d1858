//! Commerce server - order lifecycle and payment/shipment coordination
//!
//! # Architecture
//!
//! The server owns an embedded redb store and exposes three coordinators
//! over it, each operation running inside one write transaction:
//!
//! - **orders**: order aggregate (items, totals, status gating, stock moves)
//! - **payments**: two-phase payment/refund flow against a gateway
//!   abstraction (pending record committed before the gateway call)
//! - **shipping**: per-order shipment state machine
//!
//! # Module structure
//!
//! ```text
//! commerce-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── models/        # persistent entities
//! ├── store/         # redb storage layer
//! ├── orders/        # order coordinator + coupon book
//! ├── payments/      # payment coordinator + gateway abstraction
//! ├── shipping/      # shipment coordinator
//! └── utils/         # error envelope, logging
//! ```

pub mod api;
pub mod core;
pub mod models;
pub mod orders;
pub mod payments;
pub mod shipping;
pub mod store;
pub mod utils;

// Re-export public types
pub use core::{AppState, Config, Server};
pub use orders::{CouponBook, OrderService};
pub use payments::{MockGateway, PaymentCoordinator, PaymentGateway};
pub use shipping::{ProcessShipmentInput, ShipmentCoordinator};
pub use store::CommerceStore;
pub use utils::{AppError, AppResult};
