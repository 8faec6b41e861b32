//! # Views
//!
//! Flat, serializable shapes of prices and totals. `Price` and `TotalPrice`
//! serialize through these, so their JSON is exactly the view's JSON.
//!
//! ```text
//! Price       {"currency-code":"EUR","netAmount":100,"grossAmount":119,"vatAmount":19,"vatRate":1900}
//! TotalPrice  {"currency-code":"EUR","prices":{"1900":[{"gross":119,"net":100,"vat":19}]}}
//! ```
//!
//! Amounts are minor units; rates are basis points.

use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::money::Monetary;
use crate::price::{Price, Priced};
use crate::total::{TotalPrice, VatRateGroups};

/// A single price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    #[serde(rename = "currency-code")]
    pub currency_code: String,
    pub net_amount: i64,
    pub gross_amount: i64,
    pub vat_amount: i64,
    /// Basis points
    pub vat_rate: i64,
}

impl<P: Priced> From<&P> for PriceView {
    fn from(price: &P) -> Self {
        PriceView {
            currency_code: price.currency().iso_code().to_string(),
            net_amount: price.net_amount().amount(),
            gross_amount: price.gross_amount().amount(),
            vat_amount: price.vat_amount().amount(),
            vat_rate: price.vat_rate().to_basis_points(),
        }
    }
}

/// One price inside a rate group of a [`TotalPriceView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceLineView {
    pub gross: i64,
    pub net: i64,
    pub vat: i64,
}

impl<P: Priced> From<&P> for PriceLineView {
    fn from(price: &P) -> Self {
        PriceLineView {
            gross: price.gross_amount().amount(),
            net: price.net_amount().amount(),
            vat: price.vat_amount().amount(),
        }
    }
}

/// A total, with its prices grouped by rate.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct TotalPriceView {
    #[serde(rename = "currency-code")]
    pub currency_code: String,
    #[ts(as = "std::collections::HashMap<String, Vec<PriceLineView>>")]
    pub prices: VatRateGroups<PriceLineView>,
}

impl<M: Monetary> From<&TotalPrice<M>> for TotalPriceView {
    fn from(total: &TotalPrice<M>) -> Self {
        TotalPriceView {
            currency_code: total.currency().iso_code().to_string(),
            prices: total
                .prices_grouped_by_vat_rates()
                .map(|price| PriceLineView::from(&price)),
        }
    }
}

impl<M: Monetary> Serialize for Price<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PriceView::from(self).serialize(serializer)
    }
}

impl<M: Monetary> Serialize for TotalPrice<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TotalPriceView::from(self).serialize(serializer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
