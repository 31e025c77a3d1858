//! Payment API handlers
//!
//! A declined payment is a 200 with a `FAILED` transaction body; callers
//! inspect the outcome rather than catching an error.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::AppState;
use crate::models::Transaction;
use crate::utils::{AppError, AppResult};

/// Initiate payment payload
#[derive(Debug, Deserialize, Validate)]
pub struct InitiatePaymentRequest {
    #[validate(length(min = 1))]
    pub order_number: String,
    #[validate(range(min = 0.01))]
    pub amount: f64,
    #[validate(length(min = 3, max = 3))]
    pub currency_code: String,
    pub payment_method_details: String,
}

/// Initiate a payment for an order
pub async fn initiate(
    State(state): State<AppState>,
    Json(payload): Json<InitiatePaymentRequest>,
) -> AppResult<Json<Transaction>> {
    payload
        .validate()
        .map_err(|e| AppError::Invalid(e.to_string()))?;

    let tx = state
        .payments()
        .initiate(
            &payload.order_number,
            payload.amount,
            &payload.currency_code,
            &payload.payment_method_details,
            None,
        )
        .await?;
    Ok(Json(tx))
}

/// Get transaction by id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    Ok(Json(state.payments().get(&id)?))
}

/// Refund payload
#[derive(Debug, Deserialize, Default)]
pub struct RefundRequest {
    /// Partial refund amount; omitted refunds the remaining balance
    pub amount: Option<f64>,
}

/// Refund a successful payment, partially or in full
///
/// Send `{}` for a full refund of the remaining balance.
pub async fn refund(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RefundRequest>,
) -> AppResult<Json<Transaction>> {
    let tx = state.payments().refund(&id, payload.amount, None).await?;
    Ok(Json(tx))
}

/// Settle a pending transaction as successful (gateway callback)
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    Ok(Json(state.payments().complete(&id, None)?))
}

/// Settle a pending transaction as failed (gateway callback)
pub async fn fail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    Ok(Json(state.payments().fail(&id, None)?))
}
