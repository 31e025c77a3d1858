//! Financial transaction types

use serde::{Deserialize, Serialize};

/// Kind of financial event recorded against an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Payment,
    Refund,
    Authorization,
    Capture,
    Void,
}

impl TransactionType {
    /// Only settled payments and captures can be refunded
    pub fn is_refundable(&self) -> bool {
        matches!(self, TransactionType::Payment | TransactionType::Capture)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Payment => "PAYMENT",
            TransactionType::Refund => "REFUND",
            TransactionType::Authorization => "AUTHORIZATION",
            TransactionType::Capture => "CAPTURE",
            TransactionType::Void => "VOID",
        }
    }
}

/// Transaction outcome state
///
/// A transaction is created `Pending` before the gateway is contacted, so a
/// crash mid-call always leaves an auditable record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Successful,
    Failed,
    Cancelled,
    RequiresAction,
}

impl TransactionStatus {
    /// Settled states accept no further gateway outcome
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Successful | TransactionStatus::Failed | TransactionStatus::Cancelled
        )
    }

    /// A pending or successful transaction blocks a second payment attempt
    pub fn blocks_new_payment(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Pending | TransactionStatus::Successful
        )
    }

    /// Reserved amounts: pending refunds count against the refundable
    /// balance until the gateway settles them
    pub fn reserves_amount(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Pending | TransactionStatus::Successful
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Successful => "SUCCESSFUL",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
            TransactionStatus::RequiresAction => "REQUIRES_ACTION",
        }
    }
}
