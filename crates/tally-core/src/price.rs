//! # Price Module
//!
//! A net amount, a gross amount and the VAT rate linking them.
//!
//! ## Anchors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Which Side Stays Exact?                              │
//! │                                                                         │
//! │  Gross-anchored (EU shelf price)       Net-anchored (B2B list price)   │
//! │  ──────────────────────────────        ─────────────────────────────   │
//! │  gross  ── exact ──► × q               net   ── exact ──► × q          │
//! │    │                                     │                             │
//! │    ▼ ÷ (1 + rate)                        ▼ × (1 + rate)                │
//! │  net    ── derived                     gross ── derived                │
//! │                                                                         │
//! │  vat = gross - net, always by subtraction, never rounded on its own    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scaling and combining touch only the anchor amount; the other amount is
//! derived again from scratch each time, so rounding error never compounds on
//! the anchor side.
//!
//! ## Example
//! ```rust
//! use tally_core::{Currency, Monetary, Money, Price, Priced, VatRate};
//!
//! let rate = VatRate::new(19.0).unwrap();
//! let unit = Price::gross_based(Money::new(129, Currency::eur()), rate).unwrap();
//! let line = unit.multiply(1.45).unwrap();
//!
//! assert_eq!(line.gross_amount().amount(), 187);
//! assert_eq!(line.net_amount().amount(), 157);
//! assert_eq!(line.vat_amount().amount(), 30);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::Currency;
use crate::error::PriceResult;
use crate::money::{Monetary, Money};
use crate::rounding::to_decimal;
use crate::validation::{validate_compatible_rates, validate_divisor};
use crate::vat_rate::VatRate;
use crate::DEFAULT_ROUNDING;

// =============================================================================
// Anchor
// =============================================================================

/// The amount a price treats as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Net is exact; gross is derived.
    Net,
    /// Gross is exact; net is derived.
    Gross,
}

// =============================================================================
// Priced
// =============================================================================

/// Read access shared by everything that looks like a price.
///
/// [`Price::from_price`], [`Price::add`] and [`Price::subtract`] accept any
/// implementor, so line items or imported prices can be combined directly.
pub trait Priced {
    type Money: Monetary;

    fn net_amount(&self) -> &Self::Money;

    fn gross_amount(&self) -> &Self::Money;

    /// `gross - net`.
    fn vat_amount(&self) -> &Self::Money;

    fn vat_rate(&self) -> VatRate;

    /// Currency of the gross amount.
    fn currency(&self) -> &Currency {
        self.gross_amount().currency()
    }
}

// =============================================================================
// Price
// =============================================================================

/// An immutable VAT-consistent price.
///
/// ## Invariants
/// - `vat == gross - net` exactly
/// - one of `gross = round(net × (1 + r/100))` or `net = round(gross ÷ (1 + r/100))`
///   held when the price was built (which one depends on the constructor)
/// - every operation returns a new price with the same [`Anchor`]
#[derive(Debug, Clone, PartialEq)]
pub struct Price<M = Money> {
    net: M,
    gross: M,
    vat: M,
    vat_rate: VatRate,
    anchor: Anchor,
}

impl<M: Monetary> Price<M> {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Builds a price from its net amount; gross is derived, half-up.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Anchor, Currency, Monetary, Money, Price, Priced, VatRate};
    ///
    /// let rate = VatRate::new(19.0).unwrap();
    /// let price = Price::from_net(Anchor::Gross, Money::new(100, Currency::eur()), rate).unwrap();
    /// assert_eq!(price.gross_amount().amount(), 119);
    /// assert_eq!(price.vat_amount().amount(), 19);
    /// ```
    pub fn from_net(anchor: Anchor, net: M, vat_rate: VatRate) -> PriceResult<Self> {
        let gross = net.multiply(vat_rate.multiplier(), DEFAULT_ROUNDING)?;
        Self::assemble(anchor, net, gross, vat_rate)
    }

    /// Builds a price from its gross amount; net is derived, half-up.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Anchor, Currency, Monetary, Money, Price, Priced, VatRate};
    ///
    /// let rate = VatRate::new(19.0).unwrap();
    /// let price = Price::from_gross(Anchor::Gross, Money::new(3990, Currency::eur()), rate).unwrap();
    /// assert_eq!(price.net_amount().amount(), 3353);
    /// assert_eq!(price.vat_amount().amount(), 637);
    /// ```
    pub fn from_gross(anchor: Anchor, gross: M, vat_rate: VatRate) -> PriceResult<Self> {
        let net = gross.divide(vat_rate.multiplier(), DEFAULT_ROUNDING)?;
        Self::assemble(anchor, net, gross, vat_rate)
    }

    /// Copies net, gross and rate from another price without re-deriving.
    ///
    /// Whatever rounding the source carries is kept as is.
    pub fn from_price<P>(anchor: Anchor, price: &P) -> PriceResult<Self>
    where
        P: Priced<Money = M>,
    {
        Self::assemble(
            anchor,
            price.net_amount().clone(),
            price.gross_amount().clone(),
            price.vat_rate(),
        )
    }

    /// Gross-anchored price from a gross amount.
    pub fn gross_based(gross: M, vat_rate: VatRate) -> PriceResult<Self> {
        Self::from_gross(Anchor::Gross, gross, vat_rate)
    }

    /// Net-anchored price from a net amount.
    pub fn net_based(net: M, vat_rate: VatRate) -> PriceResult<Self> {
        Self::from_net(Anchor::Net, net, vat_rate)
    }

    fn assemble(anchor: Anchor, net: M, gross: M, vat_rate: VatRate) -> PriceResult<Self> {
        let vat = gross.subtract(&net)?;

        Ok(Price {
            net,
            gross,
            vat,
            vat_rate,
            anchor,
        })
    }

    /// Rebuilds a price of this anchor from a new anchor amount.
    fn rebuild(&self, anchor_amount: M, vat_rate: VatRate) -> PriceResult<Self> {
        match self.anchor {
            Anchor::Gross => Self::from_gross(Anchor::Gross, anchor_amount, vat_rate),
            Anchor::Net => Self::from_net(Anchor::Net, anchor_amount, vat_rate),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The exact side: gross for gross-anchored prices, net otherwise.
    pub fn anchor_amount(&self) -> &M {
        self.side_of(self)
    }

    /// Picks this price's anchor side out of `price`.
    fn side_of<'a, P>(&self, price: &'a P) -> &'a M
    where
        P: Priced<Money = M>,
    {
        match self.anchor {
            Anchor::Gross => price.gross_amount(),
            Anchor::Net => price.net_amount(),
        }
    }

    // -------------------------------------------------------------------------
    // Rate Compatibility
    // -------------------------------------------------------------------------

    /// Fails with `IncompatiblePriceRate` when this price has a positive rate
    /// and `other` a different one (compared in basis points).
    ///
    /// A zero-rate price accepts any operand.
    pub fn validate_compatible<P: Priced>(&self, other: &P) -> PriceResult<()> {
        validate_compatible_rates(self.vat_rate, other.vat_rate())
    }

    // -------------------------------------------------------------------------
    // Scaling
    // -------------------------------------------------------------------------

    /// Scales the anchor amount by `quantity` and derives the other side.
    pub fn multiply(&self, quantity: f64) -> PriceResult<Self> {
        let factor = to_decimal(quantity)?;

        let scaled = self.anchor_amount().multiply(factor, DEFAULT_ROUNDING)?;
        self.rebuild(scaled, self.vat_rate)
    }

    /// Divides the anchor amount by `quantity` and derives the other side.
    ///
    /// ## Errors
    /// `DivisionByZero` when `quantity` is zero.
    pub fn divide(&self, quantity: f64) -> PriceResult<Self> {
        validate_divisor(quantity)?;
        let divisor = to_decimal(quantity)?;

        let scaled = self.anchor_amount().divide(divisor, DEFAULT_ROUNDING)?;
        self.rebuild(scaled, self.vat_rate)
    }

    // -------------------------------------------------------------------------
    // Combination
    // -------------------------------------------------------------------------

    /// Adds `other`'s amount on this price's anchor side.
    ///
    /// The result carries `other`'s VAT rate. With matching rates that is the
    /// same rate; a zero-rate receiver takes on the operand's rate.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{Currency, Money, Price, VatRate};
    ///
    /// let eur = |amount| Money::new(amount, Currency::eur());
    /// let nineteen = VatRate::new(19.0).unwrap();
    ///
    /// let a = Price::gross_based(eur(3990), nineteen).unwrap();
    /// let b = Price::gross_based(eur(1000), nineteen).unwrap();
    /// assert_eq!(a.add(&b).unwrap(), Price::gross_based(eur(4990), nineteen).unwrap());
    ///
    /// let seven = Price::gross_based(eur(100), VatRate::new(7.0).unwrap()).unwrap();
    /// assert!(a.add(&seven).is_err());
    /// ```
    pub fn add<P>(&self, other: &P) -> PriceResult<Self>
    where
        P: Priced<Money = M>,
    {
        self.validate_compatible(other)?;

        let combined = self.anchor_amount().add(self.side_of(other))?;
        self.rebuild(combined, other.vat_rate())
    }

    /// Subtracts `other`'s amount on this price's anchor side.
    ///
    /// Rate handling is the same as for [`Price::add`].
    pub fn subtract<P>(&self, other: &P) -> PriceResult<Self>
    where
        P: Priced<Money = M>,
    {
        self.validate_compatible(other)?;

        let combined = self.anchor_amount().subtract(self.side_of(other))?;
        self.rebuild(combined, other.vat_rate())
    }

    // -------------------------------------------------------------------------
    // Allocation
    // -------------------------------------------------------------------------

    /// Splits the anchor amount into `targets` near-equal prices.
    ///
    /// The money split runs once; each share becomes a price with this
    /// anchor and rate, in the order the shares came back.
    pub fn allocate_to_targets(&self, targets: usize) -> PriceResult<Vec<Self>> {
        self.wrap_shares(self.anchor_amount().allocate_to(targets)?)
    }

    /// Splits the anchor amount proportionally to `ratios`.
    pub fn allocate_by_ratios(&self, ratios: &[u64]) -> PriceResult<Vec<Self>> {
        self.wrap_shares(self.anchor_amount().allocate(ratios)?)
    }

    fn wrap_shares(&self, shares: Vec<M>) -> PriceResult<Vec<Self>> {
        shares
            .into_iter()
            .map(|share| self.rebuild(share, self.vat_rate))
            .collect()
    }
}

impl<M: Monetary> Priced for Price<M> {
    type Money = M;

    #[inline]
    fn net_amount(&self) -> &M {
        &self.net
    }

    #[inline]
    fn gross_amount(&self) -> &M {
        &self.gross
    }

    #[inline]
    fn vat_amount(&self) -> &M {
        &self.vat
    }

    #[inline]
    fn vat_rate(&self) -> VatRate {
        self.vat_rate
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
