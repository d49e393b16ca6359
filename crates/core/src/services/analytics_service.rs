use crate::models::analytics::{HoldingSummary, PortfolioSummary};
use crate::models::portfolio::Portfolio;
use crate::models::quote::QuoteMap;
use crate::services::valuation_service::ValuationService;

/// Computes the visualization-ready portfolio breakdown: totals, gain/loss,
/// and per-holding allocation weights for the value-weighted treemap.
///
/// Built entirely on the valuation engine, so it inherits its fail-soft
/// behavior — partial or missing quote data degrades to cost-basis values,
/// never to an error.
pub struct AnalyticsService {
    valuation: ValuationService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            valuation: ValuationService::new(),
        }
    }

    /// Summarize the portfolio against one price map.
    #[must_use]
    pub fn summarize(&self, portfolio: &Portfolio, quotes: &QuoteMap) -> PortfolioSummary {
        let total_value = self.valuation.total_value(portfolio, quotes);

        let mut total_invested = 0.0;
        let mut holdings = Vec::with_capacity(portfolio.len());

        for holding in portfolio {
            let current_value = self.valuation.stock_value(holding, quotes);
            let percent_change = self.valuation.percent_change(holding, quotes);
            total_invested += holding.investment;

            holdings.push(HoldingSummary {
                symbol: holding.symbol.clone(),
                company_name: holding.company_name.clone(),
                shares: holding.shares,
                purchase_price: holding.purchase_price,
                investment: holding.investment,
                current_value,
                percent_change,
                gain_loss: current_value - holding.investment,
                allocation_pct: if total_value > 0.0 {
                    current_value / total_value * 100.0
                } else {
                    0.0
                },
            });
        }

        let total_gain_loss = total_value - total_invested;
        PortfolioSummary {
            total_value,
            total_invested,
            total_gain_loss,
            total_return_pct: if total_invested > 0.0 {
                total_gain_loss / total_invested * 100.0
            } else {
                0.0
            },
            holdings,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
