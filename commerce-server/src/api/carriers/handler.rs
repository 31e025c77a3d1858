//! Carrier API handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::core::AppState;
use crate::models::{Carrier, CarrierCreate};
use crate::utils::{AppError, AppResult};
use shared::DomainError;

/// Create carrier payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarrierRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub tracking_url_template: Option<String>,
}

/// Register a carrier (names are unique)
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCarrierRequest>,
) -> AppResult<Json<Carrier>> {
    payload
        .validate()
        .map_err(|e| AppError::Invalid(e.to_string()))?;

    let existing = state.store.list_carriers().map_err(DomainError::from)?;
    if existing
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(&payload.name))
    {
        return Err(DomainError::AlreadyExists(format!("carrier {}", payload.name)).into());
    }

    let carrier = Carrier::new(CarrierCreate {
        name: payload.name,
        tracking_url_template: payload.tracking_url_template,
    });

    let txn = state.store.begin_write().map_err(DomainError::from)?;
    state
        .store
        .put_carrier(&txn, &carrier)
        .map_err(DomainError::from)?;
    txn.commit()
        .map_err(|e| DomainError::Storage(e.to_string()))?;

    Ok(Json(carrier))
}

/// List all carriers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Carrier>>> {
    Ok(Json(state.store.list_carriers().map_err(DomainError::from)?))
}

/// List active carriers only
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Carrier>>> {
    let carriers = state.store.list_carriers().map_err(DomainError::from)?;
    Ok(Json(carriers.into_iter().filter(|c| c.is_active).collect()))
}
