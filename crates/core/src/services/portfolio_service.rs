use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingInput};
use crate::models::portfolio::Portfolio;

/// Validates user-submitted holdings and applies add/remove mutations.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Validate raw form input and produce a normalized holding.
    ///
    /// Rules:
    /// - symbol, company name, and purchase price are always required;
    /// - purchase price must parse to a finite number > 0;
    /// - the current form supplies a positive integer share count;
    /// - the legacy form supplies a positive total investment instead, which
    ///   is folded into whole shares (floor) the same way legacy imports are.
    ///
    /// Pure: nothing is added to any portfolio here.
    pub fn validate_new_holding(&self, input: &HoldingInput) -> Result<Holding, CoreError> {
        let symbol = input.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::MissingField("symbol".into()));
        }

        let company_name = input.company_name.trim();
        if company_name.is_empty() {
            return Err(CoreError::MissingField("companyName".into()));
        }

        let price_raw = input.purchase_price.trim();
        if price_raw.is_empty() {
            return Err(CoreError::MissingField("purchasePrice".into()));
        }
        let purchase_price: f64 = price_raw
            .parse()
            .map_err(|_| CoreError::InvalidPrice(format!("'{price_raw}' is not a number")))?;
        if !purchase_price.is_finite() || purchase_price <= 0.0 {
            return Err(CoreError::InvalidPrice(format!(
                "purchase price must be positive, got {purchase_price}"
            )));
        }

        // Current form field wins when both are filled.
        if let Some(shares_raw) = input.shares.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let shares: u64 = shares_raw.parse().map_err(|_| {
                CoreError::InvalidShares(format!("'{shares_raw}' is not a positive integer"))
            })?;
            if shares == 0 {
                return Err(CoreError::InvalidShares(
                    "share count must be at least 1".into(),
                ));
            }
            return Ok(Holding::new(symbol, company_name, purchase_price, shares));
        }

        // Legacy add form: total dollars instead of a share count.
        if let Some(inv_raw) = input.investment.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let investment: f64 = inv_raw.parse().map_err(|_| {
                CoreError::InvalidInvestment(format!("'{inv_raw}' is not a number"))
            })?;
            if !investment.is_finite() || investment <= 0.0 {
                return Err(CoreError::InvalidInvestment(format!(
                    "investment must be positive, got {investment}"
                )));
            }
            let shares = (investment / purchase_price).floor() as u64;
            if shares == 0 {
                return Err(CoreError::InvalidInvestment(format!(
                    "{investment} buys zero whole shares at {purchase_price} per share"
                )));
            }
            return Ok(Holding::new(symbol, company_name, purchase_price, shares));
        }

        Err(CoreError::MissingField("shares".into()))
    }

    /// Add a holding, merging by symbol (case-insensitive).
    ///
    /// On a symbol collision the two lots are combined: shares and
    /// investment by addition, purchase price recomputed as the
    /// weighted-average cost basis. Never produces two rows for one symbol.
    pub fn add_holding(&self, portfolio: &mut Portfolio, holding: Holding) {
        match portfolio.position(&holding.symbol) {
            Some(idx) => {
                if let Some(existing) = portfolio.get_mut(idx) {
                    *existing = Self::merge_holdings(existing, &holding);
                }
            }
            None => portfolio.push(holding),
        }
    }

    /// Remove a holding by symbol (case-insensitive).
    /// Returns `true` if a holding was removed.
    pub fn remove_holding(&self, portfolio: &mut Portfolio, symbol: &str) -> bool {
        portfolio.remove(symbol).is_some()
    }

    /// Combine two lots of the same symbol into one position with a
    /// weighted-average cost basis. Used by both add and import-merge.
    #[must_use]
    pub fn merge_holdings(existing: &Holding, incoming: &Holding) -> Holding {
        let total_shares = existing.shares + incoming.shares;
        let total_investment = existing.investment + incoming.investment;
        // Degenerate zero-share lots (legacy floor remnants) keep the
        // existing cost basis instead of dividing by zero.
        let purchase_price = if total_shares > 0 {
            total_investment / total_shares as f64
        } else {
            existing.purchase_price
        };

        Holding {
            symbol: existing.symbol.clone(),
            company_name: existing.company_name.clone(),
            purchase_price,
            shares: total_shares,
            investment: total_investment,
        }
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
