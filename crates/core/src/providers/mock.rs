use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::{PriceQuote, QuoteMap, TimeRange};

use super::traits::QuoteProvider;

/// Deterministic quote synthesis for development, demos, and tests.
///
/// Prices and percent changes derive from a character-code seed per symbol
/// and the selected range, so the same inputs always produce the same
/// quotes and the UI has realistic-looking data without any network.
/// Longer ranges produce wider percent swings, skewed positive.
#[derive(Debug, Default)]
pub struct MockQuoteProvider;

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self
    }

    fn seed(symbol: &str) -> u32 {
        symbol.chars().map(|c| c as u32).sum()
    }

    /// Percent-change span for a range: (width, downside offset).
    fn swing(range: TimeRange) -> (f64, f64) {
        match range {
            TimeRange::OneMonth => (8.0, 4.0),    // -4% to +4%
            TimeRange::ThreeMonths => (15.0, 7.0), // -7% to +8%
            TimeRange::SixMonths => (20.0, 8.0),  // -8% to +12%
            TimeRange::OneYear => (30.0, 10.0),   // -10% to +20%
        }
    }

    fn quote_for(symbol: &str, range: TimeRange) -> PriceQuote {
        let seed = Self::seed(symbol);
        let (width, offset) = Self::swing(range);

        let base = f64::from((seed * 31 + range.months() * 17) % 1000) / 1000.0 * width - offset;
        let jitter = (f64::from(seed % 10) - 5.0) / 10.0;
        let percent_change = base + jitter;

        let current_price = 10.0 + f64::from(seed % 490);
        let historical_price = current_price / (1.0 + percent_change / 100.0);

        PriceQuote {
            current_price,
            percent_change: Some(percent_change),
            historical_price: Some(historical_price),
            last_updated: Some(chrono::Utc::now().date_naive()),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for MockQuoteProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch_quotes(
        &self,
        symbols: &[String],
        range: TimeRange,
    ) -> Result<QuoteMap, CoreError> {
        Ok(symbols
            .iter()
            .map(|s| {
                let symbol = s.to_uppercase();
                let quote = Self::quote_for(&symbol, range);
                (symbol, quote)
            })
            .collect())
    }
}
