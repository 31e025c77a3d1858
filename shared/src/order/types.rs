//! Operation inputs for the order coordinator

use serde::{Deserialize, Serialize};

/// One requested line in an order creation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: u32,
}

/// Input for creating an order
///
/// The owner is either a registered user (`user_id`) or a guest identified
/// by e-mail; at least one of the two must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub items: Vec<OrderItemInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
