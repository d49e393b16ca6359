use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingRecord};
use crate::models::portfolio::Portfolio;
use crate::services::portfolio_service::PortfolioService;

/// How an imported document is reconciled with a non-empty portfolio.
/// The policy decision belongs to the caller (typically a confirm dialog);
/// the transcoder just executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Discard the current portfolio and adopt the normalized import.
    Replace,
    /// Combine same-symbol holdings via weighted-average cost basis,
    /// append new symbols.
    Merge,
}

/// Serializes portfolios to the portable JSON document and back.
///
/// Importing is all-or-nothing: any parse or schema failure rejects the
/// whole document and leaves the current portfolio untouched. The same
/// decoder also reads the persisted record, so legacy investment-only data
/// gets normalized no matter where it comes from.
pub struct TranscodeService;

impl TranscodeService {
    pub fn new() -> Self {
        Self
    }

    /// Serialize all holdings as a pretty-printed JSON array, preserving
    /// portfolio order and every holding field. Round-trips through
    /// [`import_document`](Self::import_document).
    pub fn export_document(&self, portfolio: &Portfolio) -> Result<String, CoreError> {
        serde_json::to_string_pretty(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// Suggested download name for an export taken on `date`:
    /// `investment-portfolio-<ISO-date>.json`.
    #[must_use]
    pub fn export_file_name(&self, date: NaiveDate) -> String {
        format!("investment-portfolio-{}.json", date.format("%Y-%m-%d"))
    }

    /// Parse and normalize a portfolio document.
    ///
    /// Failure modes:
    /// - malformed JSON → `ParseError` carrying the serde message;
    /// - anything but an array, or an element violating the holding schema
    ///   (empty symbol/name, non-positive price, neither integer shares nor
    ///   numeric investment) → `SchemaError` naming the constraint and the
    ///   offending element.
    ///
    /// Legacy elements are floor-normalized into whole shares here, and
    /// elements repeating a symbol (case-insensitively) are folded into one
    /// row with the usual weighted-average merge, so a decoded portfolio
    /// always satisfies the symbol-uniqueness invariant.
    pub fn decode_document(&self, text: &str) -> Result<Portfolio, CoreError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CoreError::ParseError(e.to_string()))?;

        let Value::Array(elements) = value else {
            return Err(CoreError::SchemaError(
                "document must be a JSON array of holdings".into(),
            ));
        };

        let mut portfolio = Portfolio::new();
        for (idx, element) in elements.into_iter().enumerate() {
            let record: HoldingRecord = serde_json::from_value(element)
                .map_err(|e| CoreError::SchemaError(format!("holding {idx}: {e}")))?;
            let holding = record.normalize().map_err(|e| match e {
                CoreError::SchemaError(msg) => {
                    CoreError::SchemaError(format!("holding {idx}: {msg}"))
                }
                other => other,
            })?;
            Self::merge_in(&mut portfolio, holding);
        }

        Ok(portfolio)
    }

    /// Import a document against the current portfolio.
    ///
    /// The whole document is decoded and normalized before anything is
    /// applied, so an error can never leave a partial import behind.
    /// `Replace` adopts the import wholesale; `Merge` folds same-symbol
    /// holdings together (shares and investment added, purchase price
    /// recomputed as the weighted average) and appends new symbols.
    pub fn import_document(
        &self,
        text: &str,
        current: &Portfolio,
        mode: ImportMode,
    ) -> Result<Portfolio, CoreError> {
        let imported = self.decode_document(text)?;

        // Nothing to reconcile against — mode is irrelevant.
        if current.is_empty() {
            return Ok(imported);
        }

        match mode {
            ImportMode::Replace => Ok(imported),
            ImportMode::Merge => {
                let mut merged = current.clone();
                for holding in imported.holdings() {
                    Self::merge_in(&mut merged, holding.clone());
                }
                Ok(merged)
            }
        }
    }

    fn merge_in(portfolio: &mut Portfolio, incoming: Holding) {
        match portfolio.position(&incoming.symbol) {
            Some(idx) => {
                if let Some(existing) = portfolio.get_mut(idx) {
                    *existing = PortfolioService::merge_holdings(existing, &incoming);
                }
            }
            None => portfolio.push(incoming),
        }
    }
}

impl Default for TranscodeService {
    fn default() -> Self {
        Self::new()
    }
}
