//! # Pricing Configuration
//!
//! Defaults an embedding application prices with: currency, VAT rate and
//! whether shelf prices include tax.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. JSON document ([`PricingConfig::from_json`])
//! 3. Defaults (this file)
//!
//! Values are stored raw and validated when used, so a bad currency code in a
//! config file surfaces as a `ValidationError` at the first `currency()` call.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{PriceResult, ValidationResult};
use crate::money::Money;
use crate::price::{Anchor, Price};
use crate::vat_rate::VatRate;

/// Pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Minor units per major unit (100 for cents)
    pub minor_unit_factor: u32,

    /// Default VAT rate in basis points
    /// e.g., 1900 = 19%
    pub default_vat_rate_bps: u32,

    /// Whether entered amounts are net or gross
    pub tax_mode: TaxMode,
}

/// How entered amounts relate to tax.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// Tax is added on top of the entered amount (B2B list prices)
    /// Entered: €10.00 net → €11.90 gross
    Exclusive,

    /// Tax is included in the entered amount (consumer shelf prices)
    /// Entered: €11.90 gross → €10.00 net
    #[default]
    Inclusive,
}

impl From<TaxMode> for Anchor {
    fn from(mode: TaxMode) -> Self {
        match mode {
            TaxMode::Exclusive => Anchor::Net,
            TaxMode::Inclusive => Anchor::Gross,
        }
    }
}

impl Default for PricingConfig {
    /// Euro, 19% VAT, tax-inclusive prices.
    fn default() -> Self {
        PricingConfig {
            currency_code: "EUR".to_string(),
            currency_symbol: "€".to_string(),
            minor_unit_factor: 100,
            default_vat_rate_bps: 1900,
            tax_mode: TaxMode::Inclusive,
        }
    }
}

impl PricingConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Anchor, PricingConfig};
    ///
    /// let config = PricingConfig::from_json(r#"{"defaultVatRateBps": 700, "taxMode": "exclusive"}"#).unwrap();
    /// assert_eq!(config.default_vat_rate().unwrap().to_basis_points(), 700);
    /// assert_eq!(config.anchor(), Anchor::Net);
    /// assert_eq!(config.currency_code, "EUR");
    /// ```
    pub fn from_json(json: &str) -> PriceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by environment variables.
    ///
    /// ## Environment Variables
    /// - `TALLY_CURRENCY_CODE`: Override currency code
    /// - `TALLY_CURRENCY_SYMBOL`: Override currency symbol
    /// - `TALLY_VAT_RATE`: Override default VAT rate (e.g., "7.5")
    /// - `TALLY_TAX_MODE`: `inclusive` or `exclusive`
    pub fn from_env() -> Self {
        PricingConfig::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `TALLY_*` overrides looked up through `lookup`.
    ///
    /// Unparseable values are ignored and the current value is kept. A VAT
    /// rate is rounded half-up to basis points and must fit into `u32`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("TALLY_CURRENCY_CODE") {
            self.currency_code = code;
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(rate_str) = lookup("TALLY_VAT_RATE") {
            let bps = rate_str
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|rate| VatRate::new(rate).ok())
                .and_then(|rate| u32::try_from(rate.to_basis_points()).ok());

            if let Some(bps) = bps {
                self.default_vat_rate_bps = bps;
            }
        }

        if let Some(mode) = lookup("TALLY_TAX_MODE") {
            match mode.trim().to_ascii_lowercase().as_str() {
                "inclusive" => self.tax_mode = TaxMode::Inclusive,
                "exclusive" => self.tax_mode = TaxMode::Exclusive,
                _ => {}
            }
        }

        self
    }

    /// The configured currency, validated.
    pub fn currency(&self) -> ValidationResult<Currency> {
        Currency::new(
            &self.currency_code,
            &self.currency_symbol,
            self.minor_unit_factor,
        )
    }

    pub fn default_vat_rate(&self) -> ValidationResult<VatRate> {
        VatRate::from_basis_points(i64::from(self.default_vat_rate_bps))
    }

    /// Anchor matching the tax mode.
    pub fn anchor(&self) -> Anchor {
        self.tax_mode.into()
    }

    /// Builds a price from an entered amount in minor units.
    ///
    /// Inclusive mode reads the amount as gross, exclusive mode as net.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Monetary, PricingConfig, Priced};
    ///
    /// let price = PricingConfig::default().price(3990).unwrap();
    /// assert_eq!(price.net_amount().amount(), 3353);
    /// ```
    pub fn price(&self, amount: i64) -> PriceResult<Price> {
        let money = Money::new(amount, self.currency()?);
        let vat_rate = self.default_vat_rate()?;

        match self.tax_mode {
            TaxMode::Inclusive => Price::from_gross(Anchor::Gross, money, vat_rate),
            TaxMode::Exclusive => Price::from_net(Anchor::Net, money, vat_rate),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
