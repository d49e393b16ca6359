use tracing::{debug, warn};

use crate::models::quote::{QuoteMap, TimeRange};

use super::traits::QuoteProvider;

/// Fail-soft front door to the price feed.
///
/// The valuation engine must always have *a* price map to work with, so
/// the gateway never propagates a provider failure: any error becomes an
/// empty map (logged), and quotes with unusable prices are dropped on the
/// way through. Partial maps pass through as-is.
pub struct QuoteGateway {
    provider: Box<dyn QuoteProvider>,
}

impl QuoteGateway {
    pub fn new(provider: Box<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch quotes for `symbols` over `range`. Infallible by contract:
    /// network-style failures translate to an empty map, never an error.
    pub async fn fetch(&self, symbols: &[String], range: TimeRange) -> QuoteMap {
        if symbols.is_empty() {
            return QuoteMap::new();
        }

        match self.provider.fetch_quotes(symbols, range).await {
            Ok(mut quotes) => {
                quotes.retain(|symbol, quote| {
                    if quote.is_usable() {
                        true
                    } else {
                        debug!(%symbol, price = quote.current_price, "dropping unusable quote");
                        false
                    }
                });
                debug!(
                    provider = self.provider.name(),
                    requested = symbols.len(),
                    received = quotes.len(),
                    "fetched quotes"
                );
                quotes
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "quote fetch failed, continuing without prices"
                );
                QuoteMap::new()
            }
        }
    }
}

impl std::fmt::Debug for QuoteGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteGateway")
            .field("provider", &self.provider.name())
            .finish()
    }
}
