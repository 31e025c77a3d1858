//! Currency registry model

use serde::{Deserialize, Serialize};

/// Currency referenced by transactions, immutable at transaction time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Currency {
    pub fn new(code: &str, name: &str, symbol: &str, is_default: bool) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            is_default,
            is_active: true,
        }
    }
}
