//! # Validation Module
//!
//! Input validation applied at the service boundary, before business logic
//! runs. The database still enforces NOT NULL / UNIQUE / foreign keys as the
//! last line of defense.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (item, category, table, hall, guest).
///
/// Non-empty after trimming, at most 100 characters.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a login PIN: 4 to 6 digits.
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.is_empty() {
        return Err(ValidationError::Required {
            field: "pin".to_string(),
        });
    }

    if pin.len() < 4 || pin.len() > 6 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: "must be 4-6 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price/rate in minor units: non-negative.
pub fn validate_price(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a whole-order discount in basis points: 0% to 100%.
pub fn validate_discount(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_name("table", "T1").is_ok());
        assert!(validate_name("table", "   ").is_err());
        assert!(validate_name("table", &"x".repeat(101)).is_err());
    }

    #[test]
    fn pin_rules() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("12a4").is_err());
        assert!(validate_pin("").is_err());
    }

    #[test]
    fn price_rules() {
        assert!(validate_price("price", 0).is_ok());
        assert!(validate_price("price", 15000).is_ok());
        assert!(validate_price("price", -1).is_err());
    }

    #[test]
    fn discount_rules() {
        assert!(validate_discount(0).is_ok());
        assert!(validate_discount(10000).is_ok());
        assert!(validate_discount(10001).is_err());
    }
}
