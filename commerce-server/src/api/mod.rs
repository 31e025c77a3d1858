//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - order lifecycle endpoints
//! - [`payments`] - payment/refund/transaction endpoints
//! - [`shipments`] - shipment endpoints
//! - [`products`] - catalog endpoints
//! - [`carriers`] - carrier registry endpoints
//! - [`currencies`] - currency registry endpoints

pub mod carriers;
pub mod currencies;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod shipments;

use axum::Router;

use crate::core::AppState;

/// Build the full API router
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(shipments::router())
        .merge(products::router())
        .merge(carriers::router())
        .merge(currencies::router())
}
