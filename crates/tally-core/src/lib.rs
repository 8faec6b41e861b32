//! # tally-core: VAT-Anchored Price Arithmetic
//!
//! Prices that carry a net amount, a gross amount and the VAT rate between
//! them, and stay consistent no matter how often they are scaled, combined or
//! split.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        tally-core Layers                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Consumers (checkout, invoicing, reports)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   total   │  │   price   │  │   view    │  │  config   │  │   │
//! │  │   │TotalPrice │  │   Price   │  │ PriceView │  │ Pricing-  │  │   │
//! │  │   │ RateGroups│  │  Anchor   │  │ TotalView │  │  Config   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   money (Monetary, Money) · vat_rate · currency · rounding      │   │
//! │  │   validation · error                                            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`price`] - Price, its anchor, and the read-only `Priced` trait
//! - [`total`] - TotalPrice and per-rate grouping
//! - [`money`] - The `Monetary` contract and the `Money` implementation
//! - [`vat_rate`] - VAT rate with basis-point keys
//! - [`currency`] - ISO 4217 currency value object
//! - [`rounding`] - Rounding modes over exact Decimal values
//! - [`view`] - Serializable views of prices and totals
//! - [`config`] - Pricing defaults from JSON or the environment
//! - [`error`] - Domain error types
//! - [`validation`] - Shared validation rules
//!
//! ## Design Principles
//!
//! 1. **Anchored Amounts**: One side of a price is exact; the other is derived
//! 2. **VAT by Subtraction**: `vat = gross - net`, never rounded on its own
//! 3. **Integer Money**: Amounts are whole minor units (i64), scaled in Decimal
//! 4. **Immutable Values**: Every operation returns a new value
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Currency, Monetary, Money, Price, Priced, VatRate};
//!
//! let rate = VatRate::new(19.0).unwrap();
//! let price = Price::gross_based(Money::new(3990, Currency::eur()), rate).unwrap();
//!
//! assert_eq!(price.net_amount().amount(), 3353);
//! assert_eq!(price.vat_amount().amount(), 637);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod currency;
pub mod error;
pub mod money;
pub mod price;
pub mod rounding;
pub mod total;
pub mod validation;
pub mod vat_rate;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Price` instead of
// `use tally_core::price::Price`

pub use config::{PricingConfig, TaxMode};
pub use currency::Currency;
pub use error::{PriceError, PriceResult, ValidationError, ValidationResult};
pub use money::{Monetary, Money};
pub use price::{Anchor, Price, Priced};
pub use rounding::RoundingMode;
pub use total::{TotalPrice, VatRateGroups};
pub use vat_rate::VatRate;
pub use view::{PriceLineView, PriceView, TotalPriceView};

// Monetary implementations scale by Decimal factors
pub use rust_decimal::Decimal;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rounding applied whenever a price derives or scales an amount.
///
/// Ties go away from zero: 59.5 → 60, -2.5 → -3.
pub const DEFAULT_ROUNDING: RoundingMode = RoundingMode::HalfUp;

/// Basis points per percentage point (19% = 1900 bp).
pub const BASIS_POINTS_PER_PERCENT: f64 = 100.0;
