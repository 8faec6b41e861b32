//! # VAT Rate
//!
//! A non-negative VAT percentage.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  value (f64 percent)        basis points (i64)                          │
//! │  ───────────────────        ──────────────────                          │
//! │  19.0               ◄──►    1900                                        │
//! │  7.5                ◄──►    750                                         │
//! │  16.5               ◄──►    1650                                        │
//! │                                                                         │
//! │  value:        arithmetic, equality, ordering                           │
//! │  basis points: stable key for grouping and compatibility checks         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Equality compares `value` exactly. Two rates that differ only by float
//! noise are unequal even when their basis points match.
//!
//! Arithmetic goes through the rate's [`Decimal`] form, so 19% multiplies by
//! exactly `1.19`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::rounding::RoundingMode;
use crate::validation::validate_vat_rate;
use crate::BASIS_POINTS_PER_PERCENT;

/// VAT rate as a percentage (`19.0` means 19%).
///
/// ## Example
/// ```rust
/// use tally_core::VatRate;
///
/// let rate = VatRate::new(19.0).unwrap();
/// assert_eq!(rate.to_basis_points(), 1900);
/// assert_eq!(VatRate::from_basis_points(1900).unwrap(), rate);
/// assert!(VatRate::new(7.0).unwrap() < rate);
/// assert!(VatRate::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(try_from = "f64", into = "f64")]
#[ts(export)]
pub struct VatRate(f64);

impl VatRate {
    /// Creates a rate from a percentage. Negative or non-finite values fail.
    pub fn new(value: f64) -> ValidationResult<Self> {
        validate_vat_rate(value)?;

        // Normalises -0.0, so ordering agrees with equality
        Ok(VatRate(value + 0.0))
    }

    /// Creates a rate from basis points (`1900` → 19%).
    pub fn from_basis_points(bp: i64) -> ValidationResult<Self> {
        VatRate::new(bp as f64 / BASIS_POINTS_PER_PERCENT)
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0.0)
    }

    /// Returns the percentage value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// The percentage as a [`Decimal`] (`19.0` → `19`).
    pub fn to_decimal(&self) -> Decimal {
        // Construction rejects values without a Decimal form
        Decimal::from_f64(self.0).unwrap_or_default()
    }

    /// Returns the rate in basis points, rounded half away from zero.
    pub fn to_basis_points(&self) -> i64 {
        // Only rates beyond the i64 basis-point range fail here
        self.to_decimal()
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|bp| RoundingMode::HalfUp.round(bp).ok())
            .unwrap_or(i64::MAX)
    }

    /// Factor turning a net amount into a gross amount (`1 + rate/100`).
    #[inline]
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.to_decimal() / Decimal::ONE_HUNDRED
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::zero()
    }
}

// Construction rejects NaN, so the partial order is total.
impl Eq for VatRate {}

impl PartialOrd for VatRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VatRate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for VatRate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        VatRate::new(value)
    }
}

impl From<VatRate> for f64 {
    fn from(rate: VatRate) -> Self {
        rate.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
