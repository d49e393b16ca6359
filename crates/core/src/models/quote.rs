use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Externally supplied market data for one symbol.
///
/// Absence of a quote for a held symbol is a valid state (rate limits, mock
/// mode, partial responses) — the valuation engine falls back to cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Latest known price per share.
    pub current_price: f64,

    /// Percent change over the requested time range, signed.
    /// `None` when the feed couldn't supply one; the engine then derives a
    /// change from `current_price` vs. the holding's cost basis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<f64>,

    /// Price at the start of the requested time range, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_price: Option<f64>,

    /// Trading date the quote was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

impl PriceQuote {
    /// A quote the valuation engine can actually price with: finite,
    /// strictly positive current price.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.current_price.is_finite() && self.current_price > 0.0
    }
}

/// Price data keyed by uppercase symbol. Missing symbols mean "price
/// unknown", never an error.
pub type QuoteMap = HashMap<String, PriceQuote>;

/// Time range for the percent-change figure the price feed reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl TimeRange {
    /// Length of the range in months, for historical-price lookback.
    #[must_use]
    pub fn months(&self) -> u32 {
        match self {
            TimeRange::OneMonth => 1,
            TimeRange::ThreeMonths => 3,
            TimeRange::SixMonths => 6,
            TimeRange::OneYear => 12,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TimeRange::OneMonth => "1m",
            TimeRange::ThreeMonths => "3m",
            TimeRange::SixMonths => "6m",
            TimeRange::OneYear => "1y",
        };
        write!(f, "{s}")
    }
}
