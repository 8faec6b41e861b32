//! # Total Price Module
//!
//! An ordered collection of prices in one currency, with totals and
//! per-rate groupings.
//!
//! ## Aggregation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  prices (insertion order)        vat_rates()      grouped by rate      │
//! │  ────────────────────────        ───────────      ───────────────      │
//! │  100 @ 19%  ─┐                   19%              1900 → [100, 300]    │
//! │  200 @ 7%   ─┼── fold(+) ──►     7%               700  → [200]         │
//! │  300 @ 19%  ─┘   gross 600                                             │
//! │                                                                         │
//! │  Keys are basis points; groups appear in first-occurrence order.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Currency is not checked when prices are added. A price in another currency
//! only surfaces as `CurrencyMismatch` when a total is computed.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::slice;

use crate::currency::Currency;
use crate::error::PriceResult;
use crate::money::{Monetary, Money};
use crate::price::{Price, Priced};
use crate::vat_rate::VatRate;

// =============================================================================
// TotalPrice
// =============================================================================

/// Immutable sequence of prices sharing a currency.
///
/// ## Example
/// ```rust
/// use tally_core::{Currency, Monetary, Money, Price, TotalPrice, VatRate};
///
/// let eur = |amount| Money::new(amount, Currency::eur());
/// let nineteen = VatRate::new(19.0).unwrap();
///
/// let total = TotalPrice::empty(Currency::eur())
///     .add_price(Price::gross_based(eur(100), nineteen).unwrap())
///     .add_price(Price::gross_based(eur(300), nineteen).unwrap());
///
/// assert_eq!(total.total_gross_amount().unwrap().amount(), 400);
/// assert_eq!(total.total_net_amount().unwrap().amount(), 336);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TotalPrice<M = Money> {
    currency: Currency,
    prices: Vec<Price<M>>,
}

impl<M: Monetary> TotalPrice<M> {
    pub fn new(currency: Currency, prices: Vec<Price<M>>) -> Self {
        TotalPrice { currency, prices }
    }

    pub fn empty(currency: Currency) -> Self {
        TotalPrice::new(currency, Vec::new())
    }

    /// A new total holding the same currency and prices as `other`.
    pub fn from_total_price(other: &TotalPrice<M>) -> Self {
        TotalPrice::new(other.currency.clone(), other.prices.clone())
    }

    #[inline]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    #[inline]
    pub fn prices(&self) -> &[Price<M>] {
        &self.prices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Price<M>> {
        self.prices.iter()
    }

    // -------------------------------------------------------------------------
    // Building
    // -------------------------------------------------------------------------

    /// Returns a new total with `price` appended.
    pub fn add_price(&self, price: Price<M>) -> Self {
        let mut prices = self.prices.clone();
        prices.push(price);
        TotalPrice::new(self.currency.clone(), prices)
    }

    /// Returns a new total with all of `other`'s prices appended.
    ///
    /// The receiver's currency is kept.
    pub fn add_total_price(&self, other: &TotalPrice<M>) -> Self {
        let mut prices = self.prices.clone();
        prices.extend(other.prices.iter().cloned());
        TotalPrice::new(self.currency.clone(), prices)
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    pub fn total_gross_amount(&self) -> PriceResult<M> {
        self.sum_of(|price| price.gross_amount())
    }

    pub fn total_net_amount(&self) -> PriceResult<M> {
        self.sum_of(|price| price.net_amount())
    }

    /// Sum of the stored VAT amounts, equal to gross total minus net total.
    pub fn total_vat_amount(&self) -> PriceResult<M> {
        self.sum_of(|price| price.vat_amount())
    }

    fn sum_of<F>(&self, side: F) -> PriceResult<M>
    where
        F: Fn(&Price<M>) -> &M,
    {
        self.prices
            .iter()
            .try_fold(M::zero(&self.currency), |sum, price| sum.add(side(price)))
    }

    // -------------------------------------------------------------------------
    // Rate Views
    // -------------------------------------------------------------------------

    /// Distinct rates by basis point, in order of first occurrence.
    ///
    /// When several prices share a key but differ in exact value, the last
    /// one seen is reported at the first one's position.
    pub fn vat_rates(&self) -> Vec<VatRate> {
        let mut rates: Vec<(i64, VatRate)> = Vec::new();

        for price in &self.prices {
            let rate = price.vat_rate();
            let key = rate.to_basis_points();

            match rates.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = rate,
                None => rates.push((key, rate)),
            }
        }

        rates.into_iter().map(|(_, rate)| rate).collect()
    }

    /// Prices grouped by basis-point key.
    pub fn prices_grouped_by_vat_rates(&self) -> VatRateGroups<Price<M>> {
        let mut groups = VatRateGroups::new();
        for price in &self.prices {
            groups.push(price.vat_rate().to_basis_points(), price.clone());
        }
        groups
    }
}

impl<'a, M: Monetary> IntoIterator for &'a TotalPrice<M> {
    type Item = &'a Price<M>;
    type IntoIter = slice::Iter<'a, Price<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.prices.iter()
    }
}

// =============================================================================
// VatRateGroups
// =============================================================================

/// Items keyed by VAT rate in basis points, keys in first-occurrence order.
///
/// Serializes as a JSON object (`{"1900": [...], "700": [...]}`) with the
/// keys in that same order.
#[derive(Debug, Clone, PartialEq)]
pub struct VatRateGroups<T> {
    groups: Vec<(i64, Vec<T>)>,
}

impl<T> VatRateGroups<T> {
    pub fn new() -> Self {
        VatRateGroups { groups: Vec::new() }
    }

    /// Appends `item` to the group for `basis_points`, opening it if needed.
    pub fn push(&mut self, basis_points: i64, item: T) {
        match self.groups.iter_mut().find(|(key, _)| *key == basis_points) {
            Some((_, items)) => items.push(item),
            None => self.groups.push((basis_points, vec![item])),
        }
    }

    pub fn get(&self, basis_points: i64) -> Option<&[T]> {
        self.groups
            .iter()
            .find(|(key, _)| *key == basis_points)
            .map(|(_, items)| items.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.groups.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &[T])> + '_ {
        self.groups.iter().map(|(key, items)| (*key, items.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Transforms every item, keeping keys and order.
    pub fn map<U, F>(self, mut f: F) -> VatRateGroups<U>
    where
        F: FnMut(T) -> U,
    {
        VatRateGroups {
            groups: self
                .groups
                .into_iter()
                .map(|(key, items)| (key, items.into_iter().map(&mut f).collect()))
                .collect(),
        }
    }
}

impl<T> Default for VatRateGroups<T> {
    fn default() -> Self {
        VatRateGroups::new()
    }
}

impl<T> IntoIterator for VatRateGroups<T> {
    type Item = (i64, Vec<T>);
    type IntoIter = std::vec::IntoIter<(i64, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<T: Serialize> Serialize for VatRateGroups<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, items) in &self.groups {
            map.serialize_entry(&key.to_string(), items)?;
        }
        map.end()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
