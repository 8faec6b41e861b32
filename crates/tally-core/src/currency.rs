//! # Currency
//!
//! ISO 4217 identity of a money amount.
//!
//! Two currencies are the same currency when their ISO codes match; the
//! symbol and minor unit factor are carried along for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ValidationResult;
use crate::validation::{validate_iso_code, validate_minor_unit_factor};

/// A currency: ISO code, display symbol and minor units per major unit.
///
/// ## Example
/// ```rust
/// use tally_core::Currency;
///
/// let eur = Currency::new("eur", "€", 100).unwrap();
/// assert_eq!(eur.iso_code(), "EUR");
/// assert_eq!(eur, Currency::eur());
///
/// assert!(Currency::new("EURO", "€", 100).is_err());
/// assert!(Currency::new("EUR", "€", 0).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CurrencyRecord")]
pub struct Currency {
    iso_code: String,
    symbol: String,
    minor_unit_factor: u32,
}

impl Currency {
    /// Creates a currency, upper-casing the ISO code before validation.
    pub fn new(iso_code: &str, symbol: &str, minor_unit_factor: u32) -> ValidationResult<Self> {
        let iso_code = iso_code.to_ascii_uppercase();
        validate_iso_code(&iso_code)?;
        validate_minor_unit_factor(minor_unit_factor)?;

        Ok(Currency {
            iso_code,
            symbol: symbol.to_string(),
            minor_unit_factor,
        })
    }

    /// Euro, 100 cents.
    pub fn eur() -> Self {
        Currency {
            iso_code: "EUR".to_string(),
            symbol: "€".to_string(),
            minor_unit_factor: 100,
        }
    }

    /// US dollar, 100 cents.
    pub fn usd() -> Self {
        Currency {
            iso_code: "USD".to_string(),
            symbol: "$".to_string(),
            minor_unit_factor: 100,
        }
    }

    #[inline]
    pub fn iso_code(&self) -> &str {
        &self.iso_code
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn minor_unit_factor(&self) -> u32 {
        self.minor_unit_factor
    }

    /// Number of decimal places, if the minor unit factor is a power of ten.
    ///
    /// `100` → `Some(2)`, `1` → `Some(0)`, `5` → `None`.
    pub fn decimal_places(&self) -> Option<u32> {
        let mut factor = self.minor_unit_factor;
        let mut places = 0;
        while factor > 1 {
            if factor % 10 != 0 {
                return None;
            }
            factor /= 10;
            places += 1;
        }
        Some(places)
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.iso_code == other.iso_code
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iso_code.hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_code)
    }
}

/// Unvalidated wire shape; deserialization goes through [`Currency::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyRecord {
    iso_code: String,
    symbol: String,
    minor_unit_factor: u32,
}

impl TryFrom<CurrencyRecord> for Currency {
    type Error = crate::error::ValidationError;

    fn try_from(record: CurrencyRecord) -> Result<Self, Self::Error> {
        Currency::new(&record.iso_code, &record.symbol, record.minor_unit_factor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
