use async_trait::async_trait;

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::quote::{PriceQuote, QuoteMap, TimeRange};
use portfolio_tracker_core::providers::gateway::QuoteGateway;
use portfolio_tracker_core::providers::mock::MockQuoteProvider;
use portfolio_tracker_core::providers::traits::QuoteProvider;

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Provider double that always fails at the network level.
struct FailingProvider;

#[async_trait]
impl QuoteProvider for FailingProvider {
    fn name(&self) -> &str {
        "Failing"
    }

    async fn fetch_quotes(
        &self,
        _symbols: &[String],
        _range: TimeRange,
    ) -> Result<QuoteMap, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }
}

/// Provider double returning a fixed map, unusable entries included.
struct FixedProvider(QuoteMap);

#[async_trait]
impl QuoteProvider for FixedProvider {
    fn name(&self) -> &str {
        "Fixed"
    }

    async fn fetch_quotes(
        &self,
        _symbols: &[String],
        _range: TimeRange,
    ) -> Result<QuoteMap, CoreError> {
        Ok(self.0.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MockQuoteProvider
// ═══════════════════════════════════════════════════════════════════

mod mock_provider {
    use super::*;

    #[tokio::test]
    async fn returns_quote_for_every_symbol() {
        let provider = MockQuoteProvider::new();
        let quotes = provider
            .fetch_quotes(&symbols(&["AAPL", "MSFT", "GOOG"]), TimeRange::OneMonth)
            .await
            .unwrap();
        assert_eq!(quotes.len(), 3);
    }

    #[tokio::test]
    async fn is_deterministic() {
        let provider = MockQuoteProvider::new();
        let syms = symbols(&["AAPL", "MSFT"]);
        let a = provider.fetch_quotes(&syms, TimeRange::OneYear).await.unwrap();
        let b = provider.fetch_quotes(&syms, TimeRange::OneYear).await.unwrap();
        for s in ["AAPL", "MSFT"] {
            assert_eq!(a[s].current_price, b[s].current_price);
            assert_eq!(a[s].percent_change, b[s].percent_change);
        }
    }

    #[tokio::test]
    async fn uppercases_symbol_keys() {
        let provider = MockQuoteProvider::new();
        let quotes = provider
            .fetch_quotes(&symbols(&["aapl"]), TimeRange::OneMonth)
            .await
            .unwrap();
        assert!(quotes.contains_key("AAPL"));
        assert!(!quotes.contains_key("aapl"));
    }

    #[tokio::test]
    async fn quotes_are_usable_and_complete() {
        let provider = MockQuoteProvider::new();
        let quotes = provider
            .fetch_quotes(&symbols(&["AAPL", "TSLA", "NVDA"]), TimeRange::SixMonths)
            .await
            .unwrap();
        for (symbol, q) in &quotes {
            assert!(q.is_usable(), "{symbol} price {}", q.current_price);
            assert!(q.percent_change.is_some());
            assert!(q.historical_price.is_some());
            assert!(q.last_updated.is_some());
        }
    }

    #[tokio::test]
    async fn percent_change_stays_within_range_swing() {
        let provider = MockQuoteProvider::new();
        let syms = symbols(&["AAPL", "MSFT", "GOOG", "TSLA", "NVDA", "AMZN", "META"]);
        // 1m swing is -4..+4 plus at most ±0.5 of symbol jitter.
        let quotes = provider.fetch_quotes(&syms, TimeRange::OneMonth).await.unwrap();
        for (symbol, q) in &quotes {
            let pc = q.percent_change.unwrap();
            assert!((-4.5..=4.5).contains(&pc), "{symbol}: {pc}");
        }
    }

    #[tokio::test]
    async fn historical_price_is_consistent_with_change() {
        let provider = MockQuoteProvider::new();
        let quotes = provider
            .fetch_quotes(&symbols(&["AAPL"]), TimeRange::OneYear)
            .await
            .unwrap();
        let q = &quotes["AAPL"];
        let expected = q.current_price / (1.0 + q.percent_change.unwrap() / 100.0);
        assert!((q.historical_price.unwrap() - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn different_ranges_give_different_changes() {
        let provider = MockQuoteProvider::new();
        let syms = symbols(&["AAPL"]);
        let short = provider.fetch_quotes(&syms, TimeRange::OneMonth).await.unwrap();
        let long = provider.fetch_quotes(&syms, TimeRange::OneYear).await.unwrap();
        assert_ne!(short["AAPL"].percent_change, long["AAPL"].percent_change);
    }

    #[tokio::test]
    async fn empty_symbol_list_is_empty_map() {
        let provider = MockQuoteProvider::new();
        let quotes = provider.fetch_quotes(&[], TimeRange::OneMonth).await.unwrap();
        assert!(quotes.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  QuoteGateway — fail-soft front door
// ═══════════════════════════════════════════════════════════════════

mod gateway {
    use super::*;

    #[tokio::test]
    async fn passes_provider_quotes_through() {
        let mut map = QuoteMap::new();
        map.insert(
            "AAPL".into(),
            PriceQuote {
                current_price: 180.0,
                percent_change: Some(2.0),
                historical_price: None,
                last_updated: None,
            },
        );
        let gw = QuoteGateway::new(Box::new(FixedProvider(map)));
        let quotes = gw.fetch(&symbols(&["AAPL"]), TimeRange::OneMonth).await;
        assert_eq!(quotes["AAPL"].current_price, 180.0);
    }

    #[tokio::test]
    async fn provider_failure_becomes_empty_map() {
        let gw = QuoteGateway::new(Box::new(FailingProvider));
        let quotes = gw.fetch(&symbols(&["AAPL", "MSFT"]), TimeRange::OneMonth).await;
        assert!(quotes.is_empty(), "failures must not propagate");
    }

    #[tokio::test]
    async fn unusable_quotes_are_dropped() {
        let mut map = QuoteMap::new();
        map.insert(
            "GOOD".into(),
            PriceQuote {
                current_price: 100.0,
                percent_change: None,
                historical_price: None,
                last_updated: None,
            },
        );
        map.insert(
            "BAD".into(),
            PriceQuote {
                current_price: f64::NAN,
                percent_change: Some(1.0),
                historical_price: None,
                last_updated: None,
            },
        );
        let gw = QuoteGateway::new(Box::new(FixedProvider(map)));
        let quotes = gw.fetch(&symbols(&["GOOD", "BAD"]), TimeRange::OneMonth).await;
        assert!(quotes.contains_key("GOOD"));
        assert!(!quotes.contains_key("BAD"));
    }

    #[tokio::test]
    async fn partial_results_pass_through() {
        let mut map = QuoteMap::new();
        map.insert(
            "AAPL".into(),
            PriceQuote {
                current_price: 180.0,
                percent_change: None,
                historical_price: None,
                last_updated: None,
            },
        );
        let gw = QuoteGateway::new(Box::new(FixedProvider(map)));
        // Two requested, one answered — a valid partial result.
        let quotes = gw.fetch(&symbols(&["AAPL", "MSFT"]), TimeRange::OneMonth).await;
        assert_eq!(quotes.len(), 1);
    }

    #[tokio::test]
    async fn empty_symbol_list_short_circuits() {
        let gw = QuoteGateway::new(Box::new(FailingProvider));
        // No symbols → no fetch → no failure to absorb.
        let quotes = gw.fetch(&[], TimeRange::OneMonth).await;
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn exposes_provider_name() {
        let gw = QuoteGateway::new(Box::new(MockQuoteProvider::new()));
        assert_eq!(gw.provider_name(), "Mock");
    }
}
