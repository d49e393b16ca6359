use serde::{Deserialize, Serialize};

/// Valuation breakdown for a single holding — everything a list row or a
/// value-weighted treemap tile needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingSummary {
    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Human-readable company name
    pub company_name: String,

    /// Shares held
    pub shares: u64,

    /// Weighted-average cost per share
    pub purchase_price: f64,

    /// Total cost basis (purchase_price × shares)
    pub investment: f64,

    /// Current market value (cost basis when no usable quote exists)
    pub current_value: f64,

    /// Percent change over the selected time range (0.0 with no quote data)
    pub percent_change: f64,

    /// Absolute gain/loss: current_value - investment
    pub gain_loss: f64,

    /// This holding's share of total portfolio value × 100.
    /// The treemap tile weight.
    pub allocation_pct: f64,
}

/// Summary of the entire portfolio against one price map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Total current value across all holdings
    pub total_value: f64,

    /// Total invested (sum of cost bases)
    pub total_invested: f64,

    /// Absolute gain/loss: total_value - total_invested
    pub total_gain_loss: f64,

    /// Percentage return: (total_gain_loss / total_invested) × 100
    pub total_return_pct: f64,

    /// Per-holding breakdown, in portfolio order
    pub holdings: Vec<HoldingSummary>,
}
