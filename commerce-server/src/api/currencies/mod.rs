//! Currency API module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/currencies", currency_routes())
}

fn currency_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/active", get(handler::list_active))
        .route("/{code}/set-default", post(handler::set_default))
}
