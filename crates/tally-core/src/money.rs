//! # Money Module
//!
//! The money contract prices are built on, and the crate's implementation of it.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Amounts are i64 cents. Scaling runs in Decimal and is rounded        │
//! │    straight back to whole cents.                                        │
//! │                                                                         │
//! │  Splitting 99 cents ten ways:                                           │
//! │    10 10 10 10 10 10 10 10 10 9  = 99  ✅ nothing lost                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::{Currency, Monetary, Money, RoundingMode};
//!
//! let price = Money::new(1099, Currency::eur());
//! let doubled = price.multiply(Decimal::TWO, RoundingMode::HalfUp).unwrap();
//! assert_eq!(doubled.amount(), 2198);
//!
//! let shares = Money::new(99, Currency::eur()).allocate_to(10).unwrap();
//! assert_eq!(shares.iter().map(Money::amount).sum::<i64>(), 99);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::currency::Currency;
use crate::error::{PriceError, PriceResult};
use crate::rounding::RoundingMode;
use crate::validation::{validate_allocation_targets, validate_ratios};

// =============================================================================
// Money Contract
// =============================================================================

/// What a price needs from its money type.
///
/// ## Contract
/// - `add` / `subtract` require the same currency, else `CurrencyMismatch`.
/// - `multiply` / `divide` round the exact scaled amount with the given
///   mode; a factor of one returns the amount unchanged. Dividing by zero is
///   `DivisionByZero`.
/// - `allocate_to(n)` yields exactly `n` shares summing to the original,
///   differing pairwise by at most one minor unit, larger shares first.
/// - `allocate(ratios)` yields one share per ratio summing to the original;
///   leftover units go to the largest fractional remainders, ties to the
///   earliest share.
pub trait Monetary: Clone + PartialEq + fmt::Debug + Sized {
    /// Zero amount in `currency`.
    fn zero(currency: &Currency) -> Self;

    /// Amount in minor units.
    fn amount(&self) -> i64;

    fn currency(&self) -> &Currency;

    fn add(&self, other: &Self) -> PriceResult<Self>;

    fn subtract(&self, other: &Self) -> PriceResult<Self>;

    fn multiply(&self, factor: Decimal, mode: RoundingMode) -> PriceResult<Self>;

    fn divide(&self, divisor: Decimal, mode: RoundingMode) -> PriceResult<Self>;

    fn allocate_to(&self, targets: usize) -> PriceResult<Vec<Self>>;

    fn allocate(&self, ratios: &[u64]) -> PriceResult<Vec<Self>>;
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of its currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values for refunds and credit notes
/// - **Currency attached**: arithmetic across currencies is an error, not a
///   silent mix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Currency, Monetary, Money};
    ///
    /// let price = Money::new(3990, Currency::eur()); // €39.90
    /// assert_eq!(price.amount(), 3990);
    /// assert_eq!(price.to_string(), "€39.90");
    /// ```
    #[inline]
    pub const fn new(amount: i64, currency: Currency) -> Self {
        Money { amount, currency }
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.amount < 0
    }

    fn same_currency(&self, other: &Money) -> PriceResult<()> {
        if self.currency != other.currency {
            return Err(PriceError::CurrencyMismatch {
                expected: self.currency.iso_code().to_string(),
                actual: other.currency.iso_code().to_string(),
            });
        }

        Ok(())
    }

    fn with_amount(&self, amount: i64) -> Money {
        Money::new(amount, self.currency.clone())
    }
}

impl Monetary for Money {
    fn zero(currency: &Currency) -> Self {
        Money::new(0, currency.clone())
    }

    #[inline]
    fn amount(&self) -> i64 {
        self.amount
    }

    #[inline]
    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn add(&self, other: &Self) -> PriceResult<Self> {
        self.same_currency(other)?;

        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(PriceError::Overflow { operation: "add" })?;
        Ok(self.with_amount(amount))
    }

    fn subtract(&self, other: &Self) -> PriceResult<Self> {
        self.same_currency(other)?;

        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(PriceError::Overflow {
                operation: "subtract",
            })?;
        Ok(self.with_amount(amount))
    }

    fn multiply(&self, factor: Decimal, mode: RoundingMode) -> PriceResult<Self> {
        let scaled = Decimal::from(self.amount)
            .checked_mul(factor)
            .ok_or(PriceError::Overflow {
                operation: "multiply",
            })?;
        Ok(self.with_amount(mode.round(scaled)?))
    }

    fn divide(&self, divisor: Decimal, mode: RoundingMode) -> PriceResult<Self> {
        if divisor.is_zero() {
            return Err(PriceError::DivisionByZero);
        }

        let scaled = Decimal::from(self.amount)
            .checked_div(divisor)
            .ok_or(PriceError::Overflow { operation: "divide" })?;
        Ok(self.with_amount(mode.round(scaled)?))
    }

    fn allocate_to(&self, targets: usize) -> PriceResult<Vec<Self>> {
        validate_allocation_targets(targets)?;
        debug!(amount = self.amount, targets, "Allocating money to targets");

        let ratios = vec![1; targets];
        let shares = allocate_largest_remainder(self.amount, &ratios)?;
        Ok(shares.into_iter().map(|share| self.with_amount(share)).collect())
    }

    fn allocate(&self, ratios: &[u64]) -> PriceResult<Vec<Self>> {
        validate_ratios(ratios)?;
        debug!(amount = self.amount, ?ratios, "Allocating money by ratios");

        let shares = allocate_largest_remainder(self.amount, ratios)?;
        Ok(shares.into_iter().map(|share| self.with_amount(share)).collect())
    }
}

/// Splits `amount` proportionally to `ratios` without losing a minor unit.
///
/// ## Algorithm
/// ```text
/// 5 by [3, 7]:
///   exact shares      1.5        3.5
///   floor             1          3        (4 allocated, 1 left over)
///   remainder         0.5        0.5      tie → earliest share wins
///   result            2          3
/// ```
///
/// Negative amounts split their magnitude; the sign is put back on every share.
/// `ratios` must be non-empty with a positive sum.
fn allocate_largest_remainder(amount: i64, ratios: &[u64]) -> PriceResult<Vec<i64>> {
    let total_ratio: u128 = ratios.iter().map(|ratio| u128::from(*ratio)).sum();
    let magnitude = u128::from(amount.unsigned_abs());

    let mut shares = Vec::with_capacity(ratios.len());
    let mut remainders = Vec::with_capacity(ratios.len());
    let mut allocated: u128 = 0;

    for (index, ratio) in ratios.iter().enumerate() {
        let numerator = magnitude * u128::from(*ratio);
        let share = numerator / total_ratio;
        allocated += share;
        shares.push(share);
        remainders.push((numerator % total_ratio, index));
    }

    // Stable sort: equal remainders keep index order
    remainders.sort_by(|a, b| b.0.cmp(&a.0));

    let leftover = magnitude - allocated;
    for (_, index) in remainders.into_iter().take(leftover as usize) {
        shares[index] += 1;
    }

    shares
        .into_iter()
        .map(|share| {
            let share = share as i128;
            let signed = if amount < 0 { -share } else { share };
            i64::try_from(signed).map_err(|_| PriceError::Overflow {
                operation: "allocate",
            })
        })
        .collect()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with the currency's symbol.
///
/// ## Note
/// This is for debugging and logs. Presentation layers should format with
/// their own locale rules.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency.decimal_places() {
            Some(0) => write!(f, "{}{}", self.currency.symbol(), self.amount),
            Some(places) => {
                let factor = self.currency.minor_unit_factor() as u64;
                let magnitude = self.amount.unsigned_abs();
                let sign = if self.amount < 0 { "-" } else { "" };
                write!(
                    f,
                    "{}{}{}.{:0width$}",
                    sign,
                    self.currency.symbol(),
                    magnitude / factor,
                    magnitude % factor,
                    width = places as usize
                )
            }
            None => write!(f, "{} {}", self.amount, self.currency.iso_code()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eur(amount: i64) -> Money {
        Money::new(amount, Currency::eur())
    }

    fn amounts(shares: &[Money]) -> Vec<i64> {
        shares.iter().map(Money::amount).collect()
    }

    #[test]
    fn test_display() {
        assert_eq!(eur(1099).to_string(), "€10.99");
        assert_eq!(eur(500).to_string(), "€5.00");
        assert_eq!(eur(-550).to_string(), "-€5.50");
        assert_eq!(eur(0).to_string(), "€0.00");
        assert_eq!(
            Money::new(120, Currency::new("JPY", "¥", 1).unwrap()).to_string(),
            "¥120"
        );
    }

    #[test]
    fn test_add_and_subtract() {
        let a = eur(1000);
        let b = eur(500);

        assert_eq!(a.add(&b).unwrap().amount(), 1500);
        assert_eq!(a.subtract(&b).unwrap().amount(), 500);
        assert_eq!(b.subtract(&a).unwrap().amount(), -500);
        assert!(b.subtract(&a).unwrap().is_negative());
        assert!(a.subtract(&a).unwrap().is_zero());
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(100, Currency::usd());
        let err = eur(100).add(&usd).unwrap_err();
        assert!(matches!(err, PriceError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_overflow_is_reported() {
        let max = eur(i64::MAX);
        assert!(matches!(max.add(&eur(1)), Err(PriceError::Overflow { .. })));
        assert!(matches!(
            max.multiply(dec!(2), RoundingMode::HalfUp),
            Err(PriceError::Overflow { .. })
        ));
        assert!(matches!(
            max.multiply(Decimal::MAX, RoundingMode::HalfUp),
            Err(PriceError::Overflow { .. })
        ));
    }

    #[test]
    fn test_multiply_and_divide_round_half_up() {
        assert_eq!(eur(129).multiply(dec!(1.45), RoundingMode::HalfUp).unwrap().amount(), 187);
        assert_eq!(eur(-129).multiply(dec!(1.45), RoundingMode::HalfUp).unwrap().amount(), -187);
        assert_eq!(eur(50).multiply(dec!(1.19), RoundingMode::HalfUp).unwrap().amount(), 60);
        assert_eq!(eur(3990).divide(dec!(1.19), RoundingMode::HalfUp).unwrap().amount(), 3353);
        assert_eq!(eur(5).divide(dec!(2), RoundingMode::HalfUp).unwrap().amount(), 3);
        assert_eq!(eur(5).divide(dec!(2), RoundingMode::HalfEven).unwrap().amount(), 2);
        assert_eq!(eur(5).divide(dec!(2), RoundingMode::Floor).unwrap().amount(), 2);
        assert_eq!(eur(-5).divide(dec!(2), RoundingMode::Ceiling).unwrap().amount(), -2);
    }

    #[test]
    fn test_unit_factor_is_identity_for_large_amounts() {
        for amount in [1_234_567_890_123_456, 9_007_199_254_740_993, i64::MAX, -i64::MAX] {
            let money = eur(amount);
            assert_eq!(money.multiply(Decimal::ONE, RoundingMode::HalfUp).unwrap(), money);
            assert_eq!(money.divide(Decimal::ONE, RoundingMode::HalfUp).unwrap(), money);
        }
    }

    #[test]
    fn test_divide_by_zero() {
        assert!(matches!(
            eur(100).divide(Decimal::ZERO, RoundingMode::HalfUp),
            Err(PriceError::DivisionByZero)
        ));
    }

    #[test]
    fn test_allocate_to_targets() {
        let shares = eur(99).allocate_to(10).unwrap();
        assert_eq!(amounts(&shares), vec![10, 10, 10, 10, 10, 10, 10, 10, 10, 9]);

        let shares = eur(-99).allocate_to(10).unwrap();
        assert_eq!(amounts(&shares), vec![-10, -10, -10, -10, -10, -10, -10, -10, -10, -9]);

        let shares = eur(2).allocate_to(3).unwrap();
        assert_eq!(amounts(&shares), vec![1, 1, 0]);

        assert!(eur(99).allocate_to(0).is_err());
    }

    #[test]
    fn test_allocate_by_ratios() {
        let shares = eur(5).allocate(&[3, 7]).unwrap();
        assert_eq!(amounts(&shares), vec![2, 3]);

        let shares = eur(100).allocate(&[1, 1, 1]).unwrap();
        assert_eq!(amounts(&shares), vec![34, 33, 33]);

        // Largest remainder wins over position: 10 by [1, 2] → 3.33, 6.67
        let shares = eur(10).allocate(&[1, 2]).unwrap();
        assert_eq!(amounts(&shares), vec![3, 7]);

        let shares = eur(10).allocate(&[0, 1]).unwrap();
        assert_eq!(amounts(&shares), vec![0, 10]);

        assert!(eur(5).allocate(&[]).is_err());
        assert!(eur(5).allocate(&[0, 0]).is_err());
    }

    #[test]
    fn test_allocation_keeps_currency() {
        let usd = Money::new(100, Currency::usd());
        for share in usd.allocate(&[1, 3]).unwrap() {
            assert_eq!(share.currency(), &Currency::usd());
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: splitting never creates or loses a minor unit.
            #[test]
            fn allocate_to_preserves_sum_and_spread(
                amount in -1_000_000i64..1_000_000i64,
                targets in 1usize..50usize,
            ) {
                let shares = eur(amount).allocate_to(targets).unwrap();
                let values = amounts(&shares);

                prop_assert_eq!(values.len(), targets);
                prop_assert_eq!(values.iter().sum::<i64>(), amount);

                let max = *values.iter().max().unwrap();
                let min = *values.iter().min().unwrap();
                prop_assert!(max - min <= 1);
                // Larger (in magnitude) shares come first
                prop_assert!(values.windows(2).all(|w| w[0].abs() >= w[1].abs()));
            }

            /// Property: ratio allocation sums exactly to the original.
            #[test]
            fn allocate_by_ratios_preserves_sum(
                amount in -1_000_000i64..1_000_000i64,
                ratios in proptest::collection::vec(0u64..100u64, 1..10),
            ) {
                prop_assume!(ratios.iter().any(|r| *r > 0));

                let shares = eur(amount).allocate(&ratios).unwrap();
                prop_assert_eq!(shares.len(), ratios.len());
                prop_assert_eq!(amounts(&shares).iter().sum::<i64>(), amount);
            }
        }
    }
}
