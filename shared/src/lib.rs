//! Shared domain types for the commerce platform
//!
//! Status enums and their transition rules, operation inputs, the domain
//! error taxonomy, and money arithmetic used across the workspace.

pub mod error;
pub mod finance;
pub mod money;
pub mod order;
pub mod shipping;
pub mod util;

// Re-exports
pub use error::{DomainError, DomainResult};
pub use finance::{TransactionStatus, TransactionType};
pub use order::{CreateOrderInput, OrderItemInput, OrderStatus};
pub use shipping::ShipmentStatus;
