//! Payment gateway abstraction
//!
//! The coordinator treats any gateway response deterministically and never
//! retries; a failed attempt requires a new call from the caller.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Outcome of a gateway call
#[derive(Debug, Clone, Serialize)]
pub struct GatewayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GatewayResponse {
    pub fn approved(external_id: String) -> Self {
        Self {
            success: true,
            external_id: Some(external_id),
            error: None,
        }
    }

    pub fn declined(error: impl Into<String>) -> Self {
        Self {
            success: false,
            external_id: None,
            error: Some(error.into()),
        }
    }

    /// Raw response text as recorded on the transaction
    pub fn raw(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process_payment(
        &self,
        amount: f64,
        currency_code: &str,
        method_details: &str,
    ) -> GatewayResponse;

    async fn process_refund(
        &self,
        original_external_id: &str,
        amount: f64,
        currency_code: &str,
    ) -> GatewayResponse;
}

/// Mock gateway for demonstration and tests
///
/// Declines any payment whose method details contain "fail"; refunds always
/// succeed.
pub struct MockGateway;

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn process_payment(
        &self,
        amount: f64,
        currency_code: &str,
        method_details: &str,
    ) -> GatewayResponse {
        tracing::debug!(
            amount,
            currency = %currency_code,
            details = %method_details,
            "MockGateway: processing payment"
        );
        if method_details.to_lowercase().contains("fail") {
            return GatewayResponse::declined("Payment declined by mock gateway.");
        }
        let reference = Uuid::new_v4().simple().to_string();
        GatewayResponse::approved(format!("MOCK_GW_{}", reference[..10].to_uppercase()))
    }

    async fn process_refund(
        &self,
        original_external_id: &str,
        amount: f64,
        currency_code: &str,
    ) -> GatewayResponse {
        tracing::debug!(
            original = %original_external_id,
            amount,
            currency = %currency_code,
            "MockGateway: processing refund"
        );
        let reference = Uuid::new_v4().simple().to_string();
        GatewayResponse::approved(format!("MOCK_REF_{}", reference[..8].to_uppercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_approves_normal_details() {
        let response = MockGateway
            .process_payment(20.0, "USD", "Visa ending in 4242")
            .await;
        assert!(response.success);
        assert!(response.external_id.unwrap().starts_with("MOCK_GW_"));
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_mock_gateway_declines_on_fail_keyword() {
        let response = MockGateway
            .process_payment(20.0, "USD", "card_FAIL_decline")
            .await;
        assert!(!response.success);
        assert!(response.external_id.is_none());
        assert!(response.error.unwrap().contains("declined"));
    }

    #[tokio::test]
    async fn test_mock_gateway_refund_reference_prefix() {
        let response = MockGateway.process_refund("MOCK_GW_ABC", 5.0, "USD").await;
        assert!(response.success);
        assert!(response.external_id.unwrap().starts_with("MOCK_REF_"));
    }

    #[test]
    fn test_raw_serializes_outcome() {
        let raw = GatewayResponse::declined("nope").raw();
        assert!(raw.contains("\"success\":false"));
        assert!(raw.contains("nope"));
    }
}
