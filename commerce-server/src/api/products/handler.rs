//! Product API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::AppState;
use crate::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::{AppError, AppResult};
use shared::money::validate_price;
use shared::{util, DomainError};

/// Create product payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub available: Option<bool>,
}

/// Create a product
///
/// The slug is generated from the name; a counter suffix disambiguates
/// products sharing the same name.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<Product>> {
    payload
        .validate()
        .map_err(|e| AppError::Invalid(e.to_string()))?;
    validate_price(payload.price)?;

    let base_slug = util::slugify(&payload.name);
    if base_slug.is_empty() {
        return Err(DomainError::Validation("product name yields an empty slug".to_string()).into());
    }
    let mut slug = base_slug.clone();
    let mut counter = 1;
    while state.store.slug_taken(&slug).map_err(DomainError::from)? {
        slug = format!("{}-{}", base_slug, counter);
        counter += 1;
    }

    let product = Product::new(
        ProductCreate {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            stock: payload.stock,
            available: payload.available,
        },
        slug,
    );

    let txn = state.store.begin_write().map_err(DomainError::from)?;
    state
        .store
        .put_product(&txn, &product)
        .map_err(DomainError::from)?;
    txn.commit()
        .map_err(|e| DomainError::Storage(e.to_string()))?;

    Ok(Json(product))
}

/// List all products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(state.store.list_products().map_err(DomainError::from)?))
}

/// Get product by slug
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .store
        .product_by_slug(&slug)
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::NotFound(format!("Product {}", slug)))?;
    Ok(Json(product))
}

/// Update a product's catalog fields (price changes never touch past orders)
pub async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price {
        validate_price(price)?;
    }

    let txn = state.store.begin_write().map_err(DomainError::from)?;
    let mut product = state
        .store
        .product_by_slug(&slug)
        .map_err(DomainError::from)?
        .ok_or_else(|| DomainError::NotFound(format!("Product {}", slug)))?;

    if let Some(name) = payload.name {
        product.name = name;
    }
    if let Some(description) = payload.description {
        product.description = description;
    }
    if let Some(price) = payload.price {
        product.price = price;
    }
    if let Some(stock) = payload.stock {
        product.stock = stock;
    }
    if let Some(available) = payload.available {
        product.available = available;
    }
    product.updated_at = util::now_millis();

    state
        .store
        .put_product(&txn, &product)
        .map_err(DomainError::from)?;
    txn.commit()
        .map_err(|e| DomainError::Storage(e.to_string()))?;

    Ok(Json(product))
}
