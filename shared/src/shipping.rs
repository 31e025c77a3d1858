//! Shipment status state machine
//!
//! Forward chain: `Pending → ReadyToShip → Shipped → InTransit → Delivered`.
//! `FailedDelivery` and `Cancelled` are reachable from any non-terminal
//! state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    ReadyToShip,
    Shipped,
    InTransit,
    Delivered,
    FailedDelivery,
    Cancelled,
}

impl ShipmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Cancelled)
    }

    /// Cancellation is rejected once the parcel left the warehouse
    pub fn can_cancel(&self) -> bool {
        !matches!(
            self,
            ShipmentStatus::Shipped | ShipmentStatus::Delivered | ShipmentStatus::Cancelled
        )
    }

    /// Parse an external status string; `None` for unrecognized values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(ShipmentStatus::Pending),
            "READY_TO_SHIP" => Some(ShipmentStatus::ReadyToShip),
            "SHIPPED" => Some(ShipmentStatus::Shipped),
            "IN_TRANSIT" => Some(ShipmentStatus::InTransit),
            "DELIVERED" => Some(ShipmentStatus::Delivered),
            "FAILED_DELIVERY" => Some(ShipmentStatus::FailedDelivery),
            "CANCELLED" => Some(ShipmentStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "PENDING",
            ShipmentStatus::ReadyToShip => "READY_TO_SHIP",
            ShipmentStatus::Shipped => "SHIPPED",
            ShipmentStatus::InTransit => "IN_TRANSIT",
            ShipmentStatus::Delivered => "DELIVERED",
            ShipmentStatus::FailedDelivery => "FAILED_DELIVERY",
            ShipmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
