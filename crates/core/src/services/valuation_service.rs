use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;
use crate::models::quote::QuoteMap;

/// The valuation engine: turns holdings plus a price map into current
/// values and performance figures.
///
/// Every function here is pure and total — price-feed availability is never
/// guaranteed (rate limits, mock mode, partial responses), so each operation
/// degrades to a safe numeric default instead of failing. Nothing in this
/// service returns an error or a negative value.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Current market value of one holding.
    ///
    /// With a usable quote (finite, positive current price):
    /// `shares × current_price`. Without one, fall back in priority order to
    /// the recorded cost basis, then `shares × purchase_price`, then `0.0`.
    #[must_use]
    pub fn stock_value(&self, holding: &Holding, quotes: &QuoteMap) -> f64 {
        if let Some(quote) = quotes.get(&holding.symbol) {
            if quote.is_usable() {
                return holding.shares as f64 * quote.current_price;
            }
        }

        if holding.investment.is_finite() && holding.investment > 0.0 {
            return holding.investment;
        }

        let at_cost = holding.shares as f64 * holding.purchase_price;
        if at_cost.is_finite() && at_cost > 0.0 {
            at_cost
        } else {
            0.0
        }
    }

    /// Percent change of one holding over the feed's time range.
    ///
    /// Prefers the quote's own figure when finite; otherwise derives
    /// `((current − purchase) / purchase) × 100` from a usable current
    /// price. With no quote data at all, reports `0.0`.
    ///
    /// Admission validation rejects non-positive purchase prices, so the
    /// divide guard here should never fire on normalized data.
    #[must_use]
    pub fn percent_change(&self, holding: &Holding, quotes: &QuoteMap) -> f64 {
        let Some(quote) = quotes.get(&holding.symbol) else {
            return 0.0;
        };

        if let Some(change) = quote.percent_change {
            if change.is_finite() {
                return change;
            }
        }

        if quote.is_usable() && holding.purchase_price > 0.0 {
            let change =
                (quote.current_price - holding.purchase_price) / holding.purchase_price * 100.0;
            if change.is_finite() {
                return change;
            }
        }

        0.0
    }

    /// Total current value of the portfolio: sum of `stock_value` over all
    /// holdings.
    #[must_use]
    pub fn total_value(&self, portfolio: &Portfolio, quotes: &QuoteMap) -> f64 {
        portfolio
            .iter()
            .map(|holding| self.stock_value(holding, quotes))
            .sum()
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
