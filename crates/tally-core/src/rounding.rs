//! # Rounding
//!
//! Scaling happens in base-10 [`Decimal`]; only the final result is rounded
//! back to whole minor units.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  50 cents × 1.19                                                        │
//! │                                                                         │
//! │  f64:      59.49999999999999…   → half-up → 59   ❌ WRONG SIDE          │
//! │  Decimal:  59.50                → half-up → 60   ✅                     │
//! │                                                                         │
//! │  Any i64 amount converts to Decimal exactly, so a factor of 1          │
//! │  returns the amount unchanged at every magnitude.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{PriceError, PriceResult};
use crate::validation::validate_quantity;

/// How a fractional amount of minor units becomes a whole one.
///
/// Prices always use [`RoundingMode::HalfUp`]. The other modes are part of
/// the [`Monetary`](crate::Monetary) contract for callers scaling money
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties round away from zero (2.5 → 3, -2.5 → -3). Used by all prices.
    #[default]
    HalfUp,
    /// Ties round toward zero (2.5 → 2, -2.5 → -2).
    HalfDown,
    /// Ties round to the even neighbour (2.5 → 2, 3.5 → 4).
    HalfEven,
    /// Always toward positive infinity.
    Ceiling,
    /// Always toward negative infinity.
    Floor,
}

impl RoundingMode {
    /// Rounds `value` to a whole number of minor units.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::RoundingMode;
    ///
    /// assert_eq!(RoundingMode::HalfUp.round(dec!(187.05)).unwrap(), 187);
    /// assert_eq!(RoundingMode::HalfUp.round(dec!(-2.5)).unwrap(), -3);
    /// assert_eq!(RoundingMode::HalfEven.round(dec!(2.5)).unwrap(), 2);
    /// ```
    pub fn round(self, value: Decimal) -> PriceResult<i64> {
        value
            .round_dp_with_strategy(0, self.strategy())
            .to_i64()
            .ok_or(PriceError::Overflow {
                operation: "rounding",
            })
    }

    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

/// Converts a caller-supplied factor to [`Decimal`].
///
/// Binary noise below f64 precision is dropped, so `0.1` becomes exactly
/// `0.1` rather than `0.1000000000000000055…`.
///
/// ## Errors
/// - `InvalidQuantity` for NaN or infinite values
/// - `Overflow` when the magnitude exceeds the Decimal range (about 7.9e28)
pub fn to_decimal(value: f64) -> PriceResult<Decimal> {
    validate_quantity(value)?;

    Decimal::from_f64(value).ok_or(PriceError::Overflow {
        operation: "decimal conversion",
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_up_rounds_ties_away_from_zero() {
        assert_eq!(RoundingMode::HalfUp.round(dec!(0.5)).unwrap(), 1);
        assert_eq!(RoundingMode::HalfUp.round(dec!(1.5)).unwrap(), 2);
        assert_eq!(RoundingMode::HalfUp.round(dec!(-0.5)).unwrap(), -1);
        assert_eq!(RoundingMode::HalfUp.round(dec!(-187.05)).unwrap(), -187);
        assert_eq!(RoundingMode::HalfUp.round(dec!(3352.9411)).unwrap(), 3353);
        assert_eq!(RoundingMode::HalfUp.round(dec!(59.50)).unwrap(), 60);
    }

    #[test]
    fn test_half_down_and_half_even() {
        assert_eq!(RoundingMode::HalfDown.round(dec!(2.5)).unwrap(), 2);
        assert_eq!(RoundingMode::HalfDown.round(dec!(-2.5)).unwrap(), -2);
        assert_eq!(RoundingMode::HalfDown.round(dec!(2.6)).unwrap(), 3);

        assert_eq!(RoundingMode::HalfEven.round(dec!(2.5)).unwrap(), 2);
        assert_eq!(RoundingMode::HalfEven.round(dec!(3.5)).unwrap(), 4);
        assert_eq!(RoundingMode::HalfEven.round(dec!(-2.5)).unwrap(), -2);
        assert_eq!(RoundingMode::HalfEven.round(dec!(-3.5)).unwrap(), -4);
    }

    #[test]
    fn test_ceiling_and_floor() {
        assert_eq!(RoundingMode::Ceiling.round(dec!(2.1)).unwrap(), 3);
        assert_eq!(RoundingMode::Ceiling.round(dec!(-2.9)).unwrap(), -2);
        assert_eq!(RoundingMode::Floor.round(dec!(2.9)).unwrap(), 2);
        assert_eq!(RoundingMode::Floor.round(dec!(-2.1)).unwrap(), -3);
        assert_eq!(RoundingMode::Floor.round(dec!(4.0)).unwrap(), 4);
    }

    #[test]
    fn test_whole_values_are_untouched_at_any_magnitude() {
        for amount in [1_234_567_890_123_456i64, 9_007_199_254_740_993, i64::MAX, i64::MIN + 1] {
            for mode in [
                RoundingMode::HalfUp,
                RoundingMode::HalfDown,
                RoundingMode::HalfEven,
                RoundingMode::Ceiling,
                RoundingMode::Floor,
            ] {
                assert_eq!(mode.round(Decimal::from(amount)).unwrap(), amount);
            }
        }
    }

    #[test]
    fn test_out_of_range_values_overflow() {
        assert!(matches!(
            RoundingMode::HalfUp.round(Decimal::from(i64::MAX) + Decimal::ONE),
            Err(PriceError::Overflow { .. })
        ));
        assert!(matches!(
            RoundingMode::HalfUp.round(Decimal::from(i64::MAX) * Decimal::TEN),
            Err(PriceError::Overflow { .. })
        ));
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal(0.1).unwrap(), dec!(0.1));
        assert_eq!(to_decimal(2.5).unwrap(), dec!(2.5));
        assert_eq!(to_decimal(-3.0).unwrap(), dec!(-3));

        assert!(matches!(
            to_decimal(f64::NAN),
            Err(PriceError::Validation(ValidationError::InvalidQuantity { .. }))
        ));
        assert!(matches!(to_decimal(1e30), Err(PriceError::Overflow { .. })));
    }
}
