use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Relative tolerance when checking the `investment == purchase_price × shares`
/// invariant on normalized holdings.
pub const INVESTMENT_TOLERANCE: f64 = 1e-9;

/// One portfolio line item in its canonical, shares-based form.
///
/// Field names serialize as camelCase because the persisted record and the
/// export document share one JSON contract with the browser frontend:
/// `{"symbol", "companyName", "purchasePrice", "shares", "investment"}`.
///
/// `investment` is denormalized (always `purchase_price × shares`) and kept
/// for display and export. The only way to build a `Holding` from untrusted
/// data is [`HoldingRecord::normalize`] — valuation code never sees the
/// legacy investment-only shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL"). Unique key within a
    /// portfolio, case-insensitively.
    pub symbol: String,

    /// Human-readable company name (e.g., "Apple Inc.")
    pub company_name: String,

    /// Price per share at acquisition. Weighted-average cost after merges.
    pub purchase_price: f64,

    /// Number of shares held. Zero is only reachable by normalizing a legacy
    /// record whose total investment is below one share's price.
    pub shares: u64,

    /// Total cost basis: `purchase_price × shares`.
    pub investment: f64,
}

impl Holding {
    /// Build a holding from its canonical parts, uppercasing the symbol and
    /// deriving `investment`.
    pub fn new(
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        purchase_price: f64,
        shares: u64,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            company_name: company_name.into(),
            purchase_price,
            shares,
            investment: purchase_price * shares as f64,
        }
    }

    /// Case-insensitive symbol comparison — the portfolio uniqueness key.
    #[must_use]
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol.trim())
    }

    /// Check the denormalization invariant within relative tolerance.
    #[must_use]
    pub fn investment_consistent(&self) -> bool {
        let expected = self.purchase_price * self.shares as f64;
        if expected == 0.0 {
            return self.investment == 0.0;
        }
        ((self.investment - expected) / expected).abs() <= INVESTMENT_TOLERANCE
    }
}

/// Raw persisted/imported shape of a holding, before admission into the core.
///
/// Two schemas coexist in the wild:
/// - current: `shares` present, `investment` derived;
/// - legacy: no `shares`, aggregate `investment` only.
///
/// [`normalize`](Self::normalize) is the single admission path that folds
/// both into a canonical [`Holding`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
    #[serde(default)]
    pub symbol: String,

    #[serde(default)]
    pub company_name: String,

    pub purchase_price: f64,

    /// Current-schema share count. Deserialized as f64 so a fractional value
    /// can be rejected with a schema message instead of a type error.
    #[serde(default)]
    pub shares: Option<f64>,

    /// Legacy-schema aggregate dollars invested.
    #[serde(default)]
    pub investment: Option<f64>,
}

impl HoldingRecord {
    /// Validate and convert into the canonical shares-based form.
    ///
    /// Legacy records (no `shares`) get `shares = floor(investment /
    /// purchase_price)` and `investment` recomputed from the floored count,
    /// so the normalized investment never exceeds the original. The floor is
    /// an intentional lossy reconciliation inherited from the stored-data
    /// contract, not a rounding bug.
    pub fn normalize(self) -> Result<Holding, CoreError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::SchemaError(
                "symbol must be a non-empty string".into(),
            ));
        }

        let company_name = self.company_name.trim().to_string();
        if company_name.is_empty() {
            return Err(CoreError::SchemaError(format!(
                "{symbol}: companyName must be a non-empty string"
            )));
        }

        if !self.purchase_price.is_finite() || self.purchase_price <= 0.0 {
            return Err(CoreError::SchemaError(format!(
                "{symbol}: purchasePrice must be a positive number (got {})",
                self.purchase_price
            )));
        }

        match (self.shares, self.investment) {
            // Current schema: shares win even if a stale investment is present.
            (Some(shares), _) => {
                if !shares.is_finite() || shares <= 0.0 || shares.fract() != 0.0 {
                    return Err(CoreError::SchemaError(format!(
                        "{symbol}: shares must be a positive integer (got {shares})"
                    )));
                }
                Ok(Holding::new(
                    symbol,
                    company_name,
                    self.purchase_price,
                    shares as u64,
                ))
            }
            // Legacy schema: derive a whole-share count from the aggregate.
            (None, Some(investment)) => {
                if !investment.is_finite() || investment <= 0.0 {
                    return Err(CoreError::SchemaError(format!(
                        "{symbol}: investment must be a positive number (got {investment})"
                    )));
                }
                let shares = (investment / self.purchase_price).floor() as u64;
                Ok(Holding::new(
                    symbol,
                    company_name,
                    self.purchase_price,
                    shares,
                ))
            }
            (None, None) => Err(CoreError::SchemaError(format!(
                "{symbol}: must have either an integer shares count or a numeric investment"
            ))),
        }
    }
}

/// Raw form strings submitted for a new holding, exactly as the user typed
/// them. `shares` is the current form field; `investment` covers the legacy
/// add form that asked for total dollars instead of a share count. When both
/// are filled, `shares` wins.
#[derive(Debug, Clone, Default)]
pub struct HoldingInput {
    pub symbol: String,
    pub company_name: String,
    pub purchase_price: String,
    pub shares: Option<String>,
    pub investment: Option<String>,
}

impl HoldingInput {
    /// Current-schema form input (symbol, company, price per share, shares).
    pub fn with_shares(
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        purchase_price: impl Into<String>,
        shares: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
            purchase_price: purchase_price.into(),
            shares: Some(shares.into()),
            investment: None,
        }
    }

    /// Legacy-schema form input (total investment instead of a share count).
    pub fn with_investment(
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        purchase_price: impl Into<String>,
        investment: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
            purchase_price: purchase_price.into(),
            shares: None,
            investment: Some(investment.into()),
        }
    }
}
