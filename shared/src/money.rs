//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary fields are stored as `f64`; every calculation goes through
//! `Decimal` and is rounded back to 2 decimal places, half away from zero.

use crate::error::{DomainError, DomainResult};
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed single amount (1,000,000)
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to currency precision
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

/// Validate a caller-supplied amount: finite, positive, within bounds
pub fn validate_amount(value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::InvalidAmount(format!(
            "amount must be a finite number, got {}",
            value
        )));
    }
    if value <= 0.0 {
        return Err(DomainError::InvalidAmount(format!(
            "amount must be positive, got {}",
            value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(DomainError::InvalidAmount(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Validate a unit price: finite, non-negative, within bounds
pub fn validate_price(value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::Validation(format!(
            "price must be a finite number, got {}",
            value
        )));
    }
    if value < 0.0 {
        return Err(DomainError::Validation(format!(
            "price must be non-negative, got {}",
            value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(DomainError::Validation(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Line total = price_at_purchase × quantity
pub fn line_total(price: f64, quantity: u32) -> Decimal {
    (to_decimal(price) * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
