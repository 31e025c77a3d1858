//! Coupon configuration service
//!
//! Discount codes are configuration, not database state: the book is parsed
//! once from config and injected into the order coordinator.

use std::collections::HashMap;

/// Immutable code → discount-rate lookup
#[derive(Debug, Clone)]
pub struct CouponBook {
    codes: HashMap<String, f64>,
}

impl CouponBook {
    /// Parse a `CODE:RATE,CODE:RATE` spec string; malformed entries are
    /// skipped with a warning
    pub fn from_spec(spec: &str) -> Self {
        let mut codes = HashMap::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            match entry.split_once(':') {
                Some((code, rate)) => match rate.trim().parse::<f64>() {
                    Ok(rate) if (0.0..=1.0).contains(&rate) => {
                        codes.insert(code.trim().to_uppercase(), rate);
                    }
                    _ => tracing::warn!(entry = %entry, "Ignoring coupon with invalid rate"),
                },
                None => tracing::warn!(entry = %entry, "Ignoring malformed coupon entry"),
            }
        }
        Self { codes }
    }

    /// Discount rate for a code, if recognized
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.codes.get(&code.to_uppercase()).copied()
    }
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::from_spec("DISCOUNT10:0.10")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_book_has_discount10() {
        let book = CouponBook::default();
        assert_eq!(book.rate("DISCOUNT10"), Some(0.10));
        assert_eq!(book.rate("discount10"), Some(0.10));
        assert_eq!(book.rate("NOPE"), None);
    }

    #[test]
    fn test_from_spec_skips_malformed_entries() {
        let book = CouponBook::from_spec("SUMMER20:0.20, BROKEN, BAD:abc, TOOBIG:1.5, VIP:0.5");
        assert_eq!(book.rate("SUMMER20"), Some(0.20));
        assert_eq!(book.rate("VIP"), Some(0.5));
        assert_eq!(book.rate("BROKEN"), None);
        assert_eq!(book.rate("BAD"), None);
        assert_eq!(book.rate("TOOBIG"), None);
    }
}
