//! Carrier API module

mod handler;

use axum::{routing::get, Router};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/carriers", carrier_routes())
}

fn carrier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/active", get(handler::list_active))
}
