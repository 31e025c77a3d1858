//! Payment and transaction API module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/payments", post(handler::initiate))
        .nest("/api/transactions", transaction_routes())
}

fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/refund", post(handler::refund))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/fail", post(handler::fail))
}
