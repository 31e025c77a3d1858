//! Persistent entity models
//!
//! Every entity is a plain serde struct stored as JSON in the embedded
//! store. Constructors return fully-formed records; nothing mutates on save.

pub mod currency;
pub mod order;
pub mod product;
pub mod shipment;
pub mod transaction;

pub use currency::Currency;
pub use order::{Order, OrderItem, TimelineEvent};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use shipment::{Carrier, CarrierCreate, Shipment};
pub use transaction::Transaction;
