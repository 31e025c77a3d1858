//! Health check API

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::core::AppState;
use crate::utils::{ok, AppResponse};

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

async fn health() -> Json<AppResponse<Health>> {
    ok(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
