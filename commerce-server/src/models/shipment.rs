//! Shipment and carrier models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::util;
use shared::ShipmentStatus;

/// Physical fulfilment record, one-to-one with an order
///
/// `shipped_at` and `actual_delivery_date` are write-once: set on the first
/// transition to shipped / delivered and never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub status: ShipmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<i64>,
}

impl Shipment {
    pub fn new(order_id: &str) -> Self {
        Self {
            id: util::new_id(),
            order_id: order_id.to_string(),
            carrier_id: None,
            tracking_number: None,
            status: ShipmentStatus::Pending,
            estimated_delivery_date: None,
            actual_delivery_date: None,
            shipping_cost: None,
            notes: None,
            created_at: util::now_millis(),
            shipped_at: None,
        }
    }
}

/// Shipping carrier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrier {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url_template: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

impl Carrier {
    pub fn new(data: CarrierCreate) -> Self {
        let slug = util::slugify(&data.name);
        Self {
            id: util::new_id(),
            name: data.name,
            slug,
            tracking_url_template: data.tracking_url_template,
            is_active: true,
            created_at: util::now_millis(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierCreate {
    pub name: String,
    pub tracking_url_template: Option<String>,
}
