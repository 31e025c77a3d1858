//! Financial transaction model

use serde::{Deserialize, Serialize};
use shared::util;
use shared::{TransactionStatus, TransactionType};

/// One financial event (payment, refund, ...) against an order
///
/// Created `Pending` and persisted before the gateway is contacted;
/// `external_id` arrives with a successful gateway response. A refund links
/// to its original payment through `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub amount: f64,
    pub currency_code: String,
    pub kind: TransactionType,
    pub status: TransactionStatus,
    #[serde(default)]
    pub payment_method_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_response_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<i64>,
}

impl Transaction {
    /// A fresh pending payment attempt
    pub fn pending_payment(
        order_id: &str,
        amount: f64,
        currency_code: &str,
        method_details: &str,
    ) -> Self {
        Self {
            id: util::new_id(),
            order_id: order_id.to_string(),
            external_id: None,
            amount,
            currency_code: currency_code.to_string(),
            kind: TransactionType::Payment,
            status: TransactionStatus::Pending,
            payment_method_details: method_details.to_string(),
            gateway_response_raw: None,
            notes: Some("Payment initiated.".to_string()),
            parent_id: None,
            created_at: util::now_millis(),
            processed_at: None,
        }
    }

    /// A fresh pending refund linked to its original payment
    pub fn pending_refund(parent: &Transaction, amount: f64) -> Self {
        Self {
            id: util::new_id(),
            order_id: parent.order_id.clone(),
            external_id: None,
            amount,
            currency_code: parent.currency_code.clone(),
            kind: TransactionType::Refund,
            status: TransactionStatus::Pending,
            payment_method_details: parent.payment_method_details.clone(),
            gateway_response_raw: None,
            notes: Some(format!(
                "Refund initiated for transaction {}.",
                parent.external_id.as_deref().unwrap_or(&parent.id)
            )),
            parent_id: Some(parent.id.clone()),
            created_at: util::now_millis(),
            processed_at: None,
        }
    }

    /// Append a line to the free-text notes
    pub fn push_note(&mut self, line: &str) {
        match &mut self.notes {
            Some(notes) => {
                notes.push('\n');
                notes.push_str(line);
            }
            None => self.notes = Some(line.to_string()),
        }
    }
}
