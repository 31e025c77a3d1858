//! Shipment API module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/shipments", shipment_routes())
}

fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/process", post(handler::process))
        .route("/{id}/update-status", post(handler::update_status))
        .route("/{id}/cancel", post(handler::cancel))
}
