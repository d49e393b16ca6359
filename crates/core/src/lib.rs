pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    analytics::PortfolioSummary,
    holding::{Holding, HoldingInput},
    portfolio::Portfolio,
    quote::{QuoteMap, TimeRange},
};
use providers::gateway::QuoteGateway;
use providers::traits::QuoteProvider;
use services::{
    analytics_service::AnalyticsService,
    portfolio_service::PortfolioService,
    transcode_service::{ImportMode, TranscodeService},
    valuation_service::ValuationService,
};
use storage::manager::StorageManager;
use storage::store::RecordStore;

use errors::CoreError;

/// Main entry point for the Portfolio Tracker core library.
///
/// Owns the working-copy portfolio, the current price map, and all the
/// services that operate on them. The injected [`RecordStore`] is the sole
/// durable owner of the data; this struct persists after every mutation and
/// is authoritative only between loads and saves.
#[must_use]
pub struct PortfolioTracker {
    portfolio: Portfolio,
    quotes: QuoteMap,
    time_range: TimeRange,
    storage: StorageManager,
    gateway: QuoteGateway,
    portfolio_service: PortfolioService,
    valuation_service: ValuationService,
    transcode_service: TranscodeService,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("holdings", &self.portfolio.len())
            .field("quotes", &self.quotes.len())
            .field("time_range", &self.time_range)
            .finish()
    }
}

impl PortfolioTracker {
    /// Build a tracker over a record store and a price feed, loading any
    /// persisted portfolio fail-soft (first run, corruption, or an
    /// unavailable medium all start empty — never an error).
    pub fn new(store: Box<dyn RecordStore>, provider: Box<dyn QuoteProvider>) -> Self {
        let storage = StorageManager::new(store);
        let portfolio = storage.load();

        Self {
            portfolio,
            quotes: QuoteMap::new(),
            time_range: TimeRange::default(),
            storage,
            gateway: QuoteGateway::new(provider),
            portfolio_service: PortfolioService::new(),
            valuation_service: ValuationService::new(),
            transcode_service: TranscodeService::new(),
            analytics_service: AnalyticsService::new(),
        }
    }

    /// Ephemeral tracker with in-memory storage and the deterministic mock
    /// feed. Handy for demos and tests.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(storage::store::MemoryStore::new()),
            Box::new(providers::mock::MockQuoteProvider::new()),
        )
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Validate raw form input and add the holding, merging by symbol:
    /// adding a symbol that's already held combines the two lots
    /// (weighted-average cost basis) instead of creating a second row.
    /// Persists on success.
    pub fn add_holding(&mut self, input: &HoldingInput) -> Result<(), CoreError> {
        let holding = self.portfolio_service.validate_new_holding(input)?;
        self.portfolio_service
            .add_holding(&mut self.portfolio, holding);
        self.storage.save(&self.portfolio);
        Ok(())
    }

    /// Remove a holding by symbol (case-insensitive). Persists when a
    /// holding was actually removed; returns whether one was.
    pub fn remove_holding(&mut self, symbol: &str) -> bool {
        let removed = self
            .portfolio_service
            .remove_holding(&mut self.portfolio, symbol);
        if removed {
            self.storage.save(&self.portfolio);
        }
        removed
    }

    /// Explicitly drop every holding and persist the empty portfolio.
    pub fn clear(&mut self) {
        self.portfolio.clear();
        self.quotes.clear();
        self.storage.save(&self.portfolio);
    }

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        self.portfolio.holdings()
    }

    #[must_use]
    pub fn get_holding(&self, symbol: &str) -> Option<&Holding> {
        self.portfolio.get(symbol)
    }

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Fetch fresh quotes for every held symbol over the current time
    /// range, then atomically replace the price map (last-write-wins).
    /// Infallible: feed failures leave an empty map, and the valuation
    /// engine degrades to cost-basis values.
    pub async fn refresh_quotes(&mut self) {
        let symbols = self.portfolio.symbols();
        self.quotes = self.gateway.fetch(&symbols, self.time_range).await;
    }

    #[must_use]
    pub fn quotes(&self) -> &QuoteMap {
        &self.quotes
    }

    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Select the range the percent-change figure is measured over. Takes
    /// effect on the next `refresh_quotes` call.
    pub fn set_time_range(&mut self, range: TimeRange) {
        self.time_range = range;
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Current market value of one holding against the cached quotes.
    #[must_use]
    pub fn stock_value(&self, holding: &Holding) -> f64 {
        self.valuation_service.stock_value(holding, &self.quotes)
    }

    /// Percent change of one holding over the selected time range.
    #[must_use]
    pub fn percent_change(&self, holding: &Holding) -> f64 {
        self.valuation_service.percent_change(holding, &self.quotes)
    }

    /// Total current value of the portfolio.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.valuation_service
            .total_value(&self.portfolio, &self.quotes)
    }

    /// Full visualization-ready breakdown: totals, gain/loss, and
    /// per-holding allocation weights.
    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        self.analytics_service
            .summarize(&self.portfolio, &self.quotes)
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Serialize the portfolio as the portable JSON document.
    pub fn export_document(&self) -> Result<String, CoreError> {
        self.transcode_service.export_document(&self.portfolio)
    }

    /// Suggested download name for an export taken today.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        self.transcode_service
            .export_file_name(chrono::Utc::now().date_naive())
    }

    /// Import a portfolio document, replacing or merging per `mode`.
    ///
    /// All-or-nothing: on any parse or schema error the current portfolio
    /// is left untouched and nothing is persisted. Returns the number of
    /// holdings in the portfolio after the import.
    pub fn import_document(&mut self, text: &str, mode: ImportMode) -> Result<usize, CoreError> {
        let imported = self
            .transcode_service
            .import_document(text, &self.portfolio, mode)?;
        let count = imported.len();
        self.portfolio = imported;
        self.storage.save(&self.portfolio);
        Ok(count)
    }
}
