//! Currency API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::AppState;
use crate::models::Currency;
use crate::utils::AppResult;
use shared::DomainError;

/// List all currencies
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Currency>>> {
    Ok(Json(
        state.store.list_currencies().map_err(DomainError::from)?,
    ))
}

/// List active currencies only
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Currency>>> {
    let currencies = state.store.list_currencies().map_err(DomainError::from)?;
    Ok(Json(
        currencies.into_iter().filter(|c| c.is_active).collect(),
    ))
}

/// Make one currency the system default (clears the previous default)
pub async fn set_default(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Currency>> {
    let updated = state
        .store
        .set_default_currency(&code)
        .map_err(DomainError::from)?;
    if !updated {
        return Err(DomainError::NotFound(format!("Currency {}", code)).into());
    }
    let currency = state
        .store
        .currency(&code)
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::NotFound(format!("Currency {}", code)))?;
    Ok(Json(currency))
}
