//! Shipment API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::core::AppState;
use crate::models::Shipment;
use crate::shipping::ProcessShipmentInput;
use crate::utils::AppResult;

/// Create shipment payload
#[derive(Debug, Deserialize)]
pub struct CreateShipmentRequest {
    pub order_number: String,
}

/// Create the shipment for an order (one per order)
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateShipmentRequest>,
) -> AppResult<Json<Shipment>> {
    let shipment = state
        .shipments()
        .create_for_order(&payload.order_number, None)?;
    Ok(Json(shipment))
}

/// List all shipments (newest first)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Shipment>>> {
    Ok(Json(state.shipments().list()?))
}

/// Get shipment by id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Shipment>> {
    Ok(Json(state.shipments().get(&id)?))
}

/// Process a pending shipment: assign carrier/tracking, move it forward
pub async fn process(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProcessShipmentInput>,
) -> AppResult<Json<Shipment>> {
    Ok(Json(state.shipments().process(&id, payload, None)?))
}

/// Update status payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Move the shipment to a new status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Shipment>> {
    Ok(Json(state.shipments().update_status(
        &id,
        &payload.status,
        None,
    )?))
}

/// Cancel a shipment that has not left the warehouse
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Shipment>> {
    Ok(Json(state.shipments().cancel(&id, None)?))
}
