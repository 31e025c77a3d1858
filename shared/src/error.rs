//! Domain error taxonomy
//!
//! Every coordinator operation reports its failure through one of these
//! variants. The HTTP layer maps each kind to a status code and error code;
//! nothing here is retried automatically.

use thiserror::Error;

/// Errors raised by the order, payment, and shipment coordinators
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate payment: {0}")]
    DuplicatePayment(String),

    #[error("Order already paid: {0}")]
    AlreadyPaid(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid refund target: {0}")]
    InvalidRefundTarget(String),

    #[error("Invalid coupon: {0}")]
    InvalidCoupon(String),

    #[error("Carrier required: {0}")]
    MissingCarrier(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for coordinator operations
pub type DomainResult<T> = Result<T, DomainError>;
