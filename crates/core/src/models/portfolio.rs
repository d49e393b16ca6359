use serde::Serialize;

use super::holding::Holding;

/// The main data container: every holding the user tracks, unique by symbol
/// (case-insensitive), in insertion order.
///
/// Serializes transparently as a bare JSON array of holdings — the same
/// shape as the single persisted record and the export document.
///
/// Deliberately does not implement `Deserialize`: untrusted documents enter
/// through the transcoder, which is the only path that normalizes legacy
/// investment-only records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    /// Create an empty portfolio — the first-run state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-normalized holdings (e.g., a decoded import).
    #[must_use]
    pub fn from_holdings(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Find a holding by symbol, case-insensitively.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.matches_symbol(symbol))
    }

    /// Position of a holding by symbol, case-insensitively.
    #[must_use]
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.holdings.iter().position(|h| h.matches_symbol(symbol))
    }

    /// Mutable access by index, for in-place merge updates.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Holding> {
        self.holdings.get_mut(index)
    }

    /// Append a holding. The caller is responsible for symbol uniqueness
    /// (use `PortfolioService::add_holding` for merge-by-symbol semantics).
    pub fn push(&mut self, holding: Holding) {
        self.holdings.push(holding);
    }

    /// Remove a holding by symbol (case-insensitive).
    /// Returns the removed holding, or `None` if the symbol wasn't held.
    pub fn remove(&mut self, symbol: &str) -> Option<Holding> {
        self.position(symbol).map(|idx| self.holdings.remove(idx))
    }

    /// Drop all holdings.
    pub fn clear(&mut self) {
        self.holdings.clear();
    }

    /// All held symbols, in portfolio order. This is the symbol list handed
    /// to the price feed gateway.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.holdings.iter().map(|h| h.symbol.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
