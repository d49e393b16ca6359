use async_trait::async_trait;
use chrono::{Months, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::{PriceQuote, QuoteMap, TimeRange};

use super::traits::QuoteProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage API provider for stock quotes.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints), so symbols are
///   fetched one at a time and callers should fetch sparingly.
/// - **Requires**: API key.
/// - **Strategy**: one TIME_SERIES_DAILY call per symbol; the latest close
///   is the current price, the closest close at `range` months back is the
///   historical price, and percent change is derived from the two.
///
/// Symbols the API can't answer for are skipped — the returned map is
/// allowed to be partial.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }

    async fn fetch_symbol(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Option<PriceQuote>, CoreError> {
        let url = format!(
            "{BASE_URL}?function=TIME_SERIES_DAILY&symbol={symbol}&outputsize=compact&apikey={}",
            self.api_key
        );

        let resp: TimeSeriesResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "AlphaVantage".into(),
                message: format!("Failed to parse daily series for {symbol}: {e}"),
            })?;

        let Some(series) = resp.time_series else {
            // Unknown symbol or rate-limited: a partial result, not a failure.
            return Ok(None);
        };

        // Newest trading day first.
        let mut days: Vec<(NaiveDate, f64)> = series
            .iter()
            .filter_map(|(date_str, day)| {
                let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
                let close: f64 = day.close.parse().ok()?;
                Some((date, close))
            })
            .collect();
        days.sort_by(|a, b| b.0.cmp(&a.0));

        let Some(&(latest_date, current_price)) = days.first() else {
            return Ok(None);
        };

        // Closest close at or before the range's start date.
        let comparison_date = latest_date
            .checked_sub_months(Months::new(range.months()))
            .unwrap_or(latest_date);
        let historical = days
            .iter()
            .find(|(date, _)| *date <= comparison_date)
            .or_else(|| days.last())
            .copied();

        let (historical_price, percent_change) = match historical {
            Some((_, hist_close)) if hist_close > 0.0 => (
                Some(hist_close),
                Some((current_price - hist_close) / hist_close * 100.0),
            ),
            _ => (None, None),
        };

        Ok(Some(PriceQuote {
            current_price,
            percent_change,
            historical_price,
            last_updated: Some(latest_date),
        }))
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyData>>,
}

#[derive(Deserialize)]
struct DailyData {
    #[serde(rename = "4. close")]
    close: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "AlphaVantage"
    }

    async fn fetch_quotes(
        &self,
        symbols: &[String],
        range: TimeRange,
    ) -> Result<QuoteMap, CoreError> {
        let mut quotes = QuoteMap::new();

        // Rate limits: fetch one symbol at a time. A failed symbol is
        // skipped so it can't discard quotes already collected.
        for symbol in symbols {
            let symbol = symbol.to_uppercase();
            match self.fetch_symbol(&symbol, range).await {
                Ok(Some(quote)) => {
                    quotes.insert(symbol, quote);
                }
                Ok(None) => {}
                Err(e) => warn!(%symbol, error = %e, "skipping symbol after failed fetch"),
            }
        }

        Ok(quotes)
    }
}
