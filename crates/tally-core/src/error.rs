//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - a value was rejected at construction               │
//! │  ├── InvalidCurrency     (ISO code, minor unit factor)                 │
//! │  ├── InvalidVatRate      (negative or unrepresentable rate)            │
//! │  ├── InvalidQuantity     (non-finite multiply/divide operand)          │
//! │  └── InvalidAllocation   (zero targets, empty or zero ratios)          │
//! │                                                                         │
//! │  PriceError       - an operation could not be carried out              │
//! │  ├── IncompatiblePriceRate                                             │
//! │  ├── DivisionByZero                                                    │
//! │  ├── CurrencyMismatch                                                  │
//! │  ├── Overflow                                                          │
//! │  ├── Validation(ValidationError)                                       │
//! │  └── Config(serde_json::Error)                                         │
//! │                                                                         │
//! │  Flow: ValidationError → PriceError → caller                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All errors are raised synchronously where the value or operation is
//! rejected. Nothing inside the crate retries or recovers.

use thiserror::Error;

// =============================================================================
// Price Error
// =============================================================================

/// Errors raised by price, money and total operations.
#[derive(Debug, Error)]
pub enum PriceError {
    /// Two prices with different VAT rates were combined.
    ///
    /// ## When This Occurs
    /// ```text
    /// Price(100, 19%).add(Price(100, 7%))
    ///      │
    ///      ▼
    /// receiver rate 1900 bp > 0 and 1900 != 700
    ///      │
    ///      ▼
    /// IncompatiblePriceRate { expected: 1900, actual: 700 }
    /// ```
    ///
    /// A zero-rate receiver never raises this.
    #[error("VAT rates don't match ({expected} != {actual})")]
    IncompatiblePriceRate { expected: i64, actual: i64 },

    /// A price or amount was divided by zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Two amounts in different currencies were added or subtracted.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },

    /// The result does not fit into an i64 amount of minor units.
    #[error("Amount overflow during {operation}")]
    Overflow { operation: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Pricing configuration could not be parsed.
    #[error("Invalid pricing configuration: {0}")]
    Config(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Malformed ISO code or non-positive minor unit factor.
    #[error("Invalid currency: {reason}")]
    InvalidCurrency { reason: String },

    /// VAT rate below zero, NaN/infinite, or beyond the Decimal range.
    #[error("VAT rate must be a non-negative percentage, got {value}")]
    InvalidVatRate { value: f64 },

    /// Quantity for multiply/divide is not a finite number.
    #[error("Invalid quantity: {reason}")]
    InvalidQuantity { reason: String },

    /// Allocation targets or ratios cannot produce any share.
    #[error("Invalid allocation: {reason}")]
    InvalidAllocation { reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with PriceError.
pub type PriceResult<T> = Result<T, PriceError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PriceError::IncompatiblePriceRate {
            expected: 1900,
            actual: 700,
        };
        assert_eq!(err.to_string(), "VAT rates don't match (1900 != 700)");

        let err = PriceError::CurrencyMismatch {
            expected: "EUR".to_string(),
            actual: "USD".to_string(),
        };
        assert_eq!(err.to_string(), "Currency mismatch: expected EUR, got USD");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvalidVatRate { value: -1.0 };
        assert_eq!(err.to_string(), "VAT rate must be a non-negative percentage, got -1");

        let err = ValidationError::InvalidCurrency {
            reason: "minor unit factor must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid currency: minor unit factor must be greater than 0"
        );
    }

    #[test]
    fn test_validation_converts_to_price_error() {
        let validation_err = ValidationError::InvalidAllocation {
            reason: "no targets".to_string(),
        };
        let price_err: PriceError = validation_err.into();
        assert!(matches!(price_err, PriceError::Validation(_)));
    }
}
