//! Order API module

mod handler;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{order_number}", get(handler::get_by_number))
        .route("/{order_number}/timeline", get(handler::timeline))
        .route("/{order_number}/transactions", get(handler::transactions))
        .route("/{order_number}/items", post(handler::add_item))
        .route(
            "/{order_number}/items/{item_id}",
            delete(handler::remove_item),
        )
        .route(
            "/{order_number}/coupon",
            post(handler::apply_coupon).delete(handler::remove_coupon),
        )
        .route("/{order_number}/cancel", post(handler::cancel))
        .route("/{order_number}/notes", post(handler::add_note))
}
