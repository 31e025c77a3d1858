//! Order API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::AppState;
use crate::models::{Order, TimelineEvent, Transaction};
use crate::utils::{AppError, AppResult};
use shared::{CreateOrderInput, OrderItemInput};

/// Create order payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub user_id: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub items: Vec<OrderItemInput>,
    pub notes: Option<String>,
}

/// Create an order with its initial items
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::Invalid(e.to_string()))?;

    let order = state.orders().create(
        CreateOrderInput {
            user_id: payload.user_id,
            email: payload.email,
            items: payload.items,
            notes: payload.notes,
        },
        None,
    )?;
    Ok(Json(order))
}

/// List all orders (newest first)
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders().list()?))
}

/// Get order by order number
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().get(&order_number)?))
}

/// Get the order's append-only timeline
pub async fn timeline(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<Vec<TimelineEvent>>> {
    Ok(Json(state.orders().timeline(&order_number)?))
}

/// Get all transactions recorded against the order
pub async fn transactions(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<Vec<Transaction>>> {
    Ok(Json(state.payments().list_for_order(&order_number)?))
}

/// Add item payload
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// Add an item to a pending order
pub async fn add_item(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders()
        .add_item(&order_number, &payload.product_id, payload.quantity, None)?;
    Ok(Json(order))
}

/// Remove item query params
#[derive(Debug, Deserialize)]
pub struct RemoveItemQuery {
    /// Partial removal quantity; omitted removes the whole line
    pub quantity: Option<u32>,
}

/// Remove an item (fully, or a partial quantity) from a pending order
pub async fn remove_item(
    State(state): State<AppState>,
    Path((order_number, item_id)): Path<(String, String)>,
    Query(query): Query<RemoveItemQuery>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders()
        .remove_item(&order_number, &item_id, query.quantity, None)?;
    Ok(Json(order))
}

/// Apply coupon payload
#[derive(Debug, Deserialize)]
pub struct ApplyCouponRequest {
    pub coupon_code: String,
}

/// Apply a coupon code to the order
pub async fn apply_coupon(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(payload): Json<ApplyCouponRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders()
        .apply_discount(&order_number, &payload.coupon_code, None)?;
    Ok(Json(order))
}

/// Remove the applied discount
pub async fn remove_coupon(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().remove_discount(&order_number, None)?))
}

/// Cancel the order, restoring stock
pub async fn cancel(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().cancel(&order_number, None)?))
}

/// Add note payload
#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub note: String,
    pub actor: Option<String>,
}

/// Append a free-text note to the order timeline
pub async fn add_note(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Json(payload): Json<AddNoteRequest>,
) -> AppResult<Json<Order>> {
    let order =
        state
            .orders()
            .add_note(&order_number, &payload.note, payload.actor.as_deref())?;
    Ok(Json(order))
}
