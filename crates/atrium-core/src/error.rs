//! # Error Types
//!
//! Domain errors for atrium-core. Database failures live in atrium-db's
//! `DbError`; rendering failures in atrium-print's `PrintError`; the service
//! layer wraps all of them.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the pure domain layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cart line cannot drop below the quantity the kitchen already has.
    #[error("{item}: {printed} already sent to kitchen, cannot remove")]
    PrintedQuantityLocked { item: String, printed: i64 },

    /// A line index did not resolve (stale UI row).
    #[error("cart line {index} out of range (cart has {len} lines)")]
    LineNotFound { index: usize, len: usize },

    /// Cart has exceeded the maximum distinct lines.
    #[error("cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation failure (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = CoreError::PrintedQuantityLocked {
            item: "Classic Burger".to_string(),
            printed: 2,
        };
        assert_eq!(
            err.to_string(),
            "Classic Burger: 2 already sent to kitchen, cannot remove"
        );

        let err = ValidationError::Required {
            field: "guest name".to_string(),
        };
        assert_eq!(err.to_string(), "guest name is required");
    }

    #[test]
    fn validation_converts_to_core_error() {
        let validation: ValidationError = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core: CoreError = validation.into();
        assert!(matches!(core, CoreError::Validation(_)));
    }
}
