//! Product API module

mod handler;

use axum::{
    routing::get,
    Router,
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{slug}", get(handler::get_by_slug).put(handler::update))
}
