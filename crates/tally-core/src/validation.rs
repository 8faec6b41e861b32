//! # Validation Module
//!
//! Input and compatibility rules shared by currencies, rates, money and prices.
//!
//! ## Where Rules Apply
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Currency::new ──────► validate_iso_code, validate_minor_unit_factor   │
//! │  VatRate::new ───────► validate_vat_rate                               │
//! │  multiply / divide ──► validate_quantity, validate_divisor             │
//! │  allocate ───────────► validate_allocation_targets, validate_ratios    │
//! │  Price add/subtract ─► validate_compatible_rates                       │
//! │                                                                         │
//! │  Once a value exists it is valid for its whole lifetime.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{PriceError, PriceResult, ValidationError, ValidationResult};
use crate::vat_rate::VatRate;

// =============================================================================
// Currency Validators
// =============================================================================

/// Validates an (already upper-cased) ISO 4217 code: exactly three letters A–Z.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_iso_code;
///
/// assert!(validate_iso_code("EUR").is_ok());
/// assert!(validate_iso_code("eur").is_err());
/// assert!(validate_iso_code("EURO").is_err());
/// ```
pub fn validate_iso_code(iso_code: &str) -> ValidationResult<()> {
    if iso_code.len() != 3 || !iso_code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidCurrency {
            reason: "ISO code must be exactly 3 letters (A-Z)".to_string(),
        });
    }

    Ok(())
}

/// Validates the number of minor units per major unit.
pub fn validate_minor_unit_factor(factor: u32) -> ValidationResult<()> {
    if factor == 0 {
        return Err(ValidationError::InvalidCurrency {
            reason: "minor unit factor must be greater than 0".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a VAT rate percentage.
///
/// ## Rules
/// - Must be a finite number
/// - Must not be negative (zero is allowed)
/// - Must fit into a [`Decimal`]
pub fn validate_vat_rate(value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value < 0.0 || Decimal::from_f64(value).is_none() {
        return Err(ValidationError::InvalidVatRate { value });
    }

    Ok(())
}

/// Validates a multiply/divide operand.
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::InvalidQuantity {
            reason: format!("{quantity} is not a finite number"),
        });
    }

    Ok(())
}

/// Validates a divisor: finite and not zero.
pub fn validate_divisor(divisor: f64) -> PriceResult<()> {
    validate_quantity(divisor)?;

    if divisor == 0.0 {
        return Err(PriceError::DivisionByZero);
    }

    Ok(())
}

// =============================================================================
// Allocation Validators
// =============================================================================

/// Validates the number of allocation targets.
pub fn validate_allocation_targets(targets: usize) -> ValidationResult<()> {
    if targets == 0 {
        return Err(ValidationError::InvalidAllocation {
            reason: "cannot allocate to zero targets".to_string(),
        });
    }

    Ok(())
}

/// Validates allocation ratios: at least one, with a positive sum.
pub fn validate_ratios(ratios: &[u64]) -> ValidationResult<()> {
    if ratios.is_empty() {
        return Err(ValidationError::InvalidAllocation {
            reason: "ratios must not be empty".to_string(),
        });
    }

    if ratios.iter().all(|ratio| *ratio == 0) {
        return Err(ValidationError::InvalidAllocation {
            reason: "sum of ratios must be greater than 0".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Price Compatibility
// =============================================================================

/// Checks that a price with rate `own` may be combined with one at `other`.
///
/// ## Rules
/// ```text
/// own.bp > 0 && own.bp != other.bp  →  IncompatiblePriceRate
/// own.bp == 0                       →  accepted, whatever `other` is
/// ```
///
/// A zero-rate receiver is not checked. When its operand carries another
/// rate the combination goes through and is logged at warn level.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_compatible_rates;
/// use tally_core::VatRate;
///
/// let nineteen = VatRate::new(19.0).unwrap();
/// let seven = VatRate::new(7.0).unwrap();
///
/// assert!(validate_compatible_rates(nineteen, nineteen).is_ok());
/// assert!(validate_compatible_rates(nineteen, seven).is_err());
/// assert!(validate_compatible_rates(VatRate::zero(), seven).is_ok());
/// ```
pub fn validate_compatible_rates(own: VatRate, other: VatRate) -> PriceResult<()> {
    let expected = own.to_basis_points();
    let actual = other.to_basis_points();

    if expected > 0 && expected != actual {
        debug!(expected, actual, "Rejecting price with mismatched VAT rate");
        return Err(PriceError::IncompatiblePriceRate { expected, actual });
    }

    if expected == 0 && actual != 0 {
        warn!(
            actual,
            "Zero-rate price combined with a differently rated price"
        );
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
