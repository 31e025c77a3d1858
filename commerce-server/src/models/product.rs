//! Product model (catalog collaborator)
//!
//! Stock is only ever mutated inside the same store transaction as the
//! order/item mutation that triggered it.

use serde::{Deserialize, Serialize};
use shared::util;

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default = "default_true")]
    pub available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl Product {
    pub fn new(data: ProductCreate, slug: String) -> Self {
        let now = util::now_millis();
        Self {
            id: util::new_id(),
            name: data.name,
            slug,
            description: data.description.unwrap_or_default(),
            price: data.price,
            stock: data.stock,
            available: data.available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub available: Option<bool>,
}
