//! Small utilities: timestamps, identifiers, slugs

use chrono::Utc;
use uuid::Uuid;

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's date (UTC)
pub fn today() -> chrono::NaiveDate {
    Utc::now().date_naive()
}

/// New entity id (UUID v4, hyphenated)
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a customer-facing order number: `ORD-` + 8 uppercase hex chars
pub fn new_order_number() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", hex[..8].to_uppercase())
}

/// Slugify a display name: lowercase, alphanumeric runs joined by `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_shape() {
        let number = new_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), 12);
        assert!(number[4..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_order_numbers_unique() {
        let a = new_order_number();
        let b = new_order_number();
        assert_ne!(a, b);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Royal Mail"), "royal-mail");
        assert_eq!(slugify("  DHL  Express!! "), "dhl-express");
        assert_eq!(slugify("UPS"), "ups");
        assert_eq!(slugify(""), "");
    }
}
