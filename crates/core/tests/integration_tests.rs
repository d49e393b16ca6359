use std::sync::Arc;

use portfolio_tracker_core::models::holding::HoldingInput;
use portfolio_tracker_core::models::quote::TimeRange;
use portfolio_tracker_core::providers::mock::MockQuoteProvider;
use portfolio_tracker_core::services::transcode_service::ImportMode;
use portfolio_tracker_core::storage::file_store::FileStore;
use portfolio_tracker_core::storage::store::{MemoryStore, RecordStore};
use portfolio_tracker_core::PortfolioTracker;

fn tracker_with(store: Arc<MemoryStore>) -> PortfolioTracker {
    PortfolioTracker::new(Box::new(store), Box::new(MockQuoteProvider::new()))
}

fn aapl_input() -> HoldingInput {
    HoldingInput::with_shares("AAPL", "Apple Inc.", "150.0", "10")
}

// ═══════════════════════════════════════════════════════════════════
//  Lifecycle: add, merge, remove, persist
// ═══════════════════════════════════════════════════════════════════

#[test]
fn first_run_starts_empty() {
    let tracker = PortfolioTracker::in_memory();
    assert!(tracker.holdings().is_empty());
    assert_eq!(tracker.total_value(), 0.0);
}

#[test]
fn add_then_query() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();

    let h = tracker.get_holding("aapl").unwrap();
    assert_eq!(h.symbol, "AAPL");
    assert_eq!(h.shares, 10);
    assert_eq!(h.investment, 1500.0);
}

#[test]
fn adding_same_symbol_twice_merges() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();
    tracker
        .add_holding(&HoldingInput::with_shares("AAPL", "Apple Inc.", "150.0", "5"))
        .unwrap();

    assert_eq!(tracker.holdings().len(), 1, "must merge, not append");
    let h = tracker.get_holding("AAPL").unwrap();
    assert_eq!(h.shares, 15);
    assert_eq!(h.investment, 2250.0);
    assert_eq!(h.purchase_price, 150.0);
}

#[test]
fn invalid_input_leaves_portfolio_untouched() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();

    let err = tracker
        .add_holding(&HoldingInput::with_shares("MSFT", "Microsoft", "oops", "5"))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(tracker.holdings().len(), 1);
}

#[test]
fn remove_holding_round_trip() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();
    assert!(tracker.remove_holding("aapl"));
    assert!(!tracker.remove_holding("aapl"));
    assert!(tracker.holdings().is_empty());
}

#[test]
fn mutations_persist_across_sessions() {
    let store = Arc::new(MemoryStore::new());

    let mut first = tracker_with(Arc::clone(&store));
    first.add_holding(&aapl_input()).unwrap();
    first
        .add_holding(&HoldingInput::with_shares("MSFT", "Microsoft", "300", "5"))
        .unwrap();
    first.remove_holding("MSFT");
    drop(first);

    let second = tracker_with(store);
    assert_eq!(second.holdings().len(), 1);
    assert_eq!(second.get_holding("AAPL").unwrap().shares, 10);
}

#[test]
fn corrupt_store_degrades_to_empty() {
    let store = Arc::new(MemoryStore::with_record("definitely not json"));
    let tracker = tracker_with(store);
    assert!(tracker.holdings().is_empty());
}

#[test]
fn legacy_persisted_record_is_normalized_on_startup() {
    let store = Arc::new(MemoryStore::with_record(
        r#"[{"symbol": "X", "companyName": "C", "purchasePrice": 10.0, "investment": 105.0}]"#,
    ));
    let tracker = tracker_with(store);
    let h = tracker.get_holding("X").unwrap();
    assert_eq!(h.shares, 10);
    assert_eq!(h.investment, 100.0);
}

#[test]
fn clear_empties_and_persists() {
    let store = Arc::new(MemoryStore::new());
    let mut tracker = tracker_with(Arc::clone(&store));
    tracker.add_holding(&aapl_input()).unwrap();
    tracker.clear();

    assert!(tracker.holdings().is_empty());
    let reloaded = tracker_with(store);
    assert!(reloaded.holdings().is_empty());
}

#[test]
fn file_backed_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.json");

    let mut first = PortfolioTracker::new(
        Box::new(FileStore::new(&path)),
        Box::new(MockQuoteProvider::new()),
    );
    first.add_holding(&aapl_input()).unwrap();
    drop(first);

    let second = PortfolioTracker::new(
        Box::new(FileStore::new(&path)),
        Box::new(MockQuoteProvider::new()),
    );
    assert_eq!(second.get_holding("AAPL").unwrap().shares, 10);
}

// ═══════════════════════════════════════════════════════════════════
//  Quotes and valuation
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn refresh_quotes_replaces_price_map() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();

    assert!(tracker.quotes().is_empty());
    tracker.refresh_quotes().await;
    assert!(tracker.quotes().contains_key("AAPL"));

    let h = tracker.get_holding("AAPL").unwrap().clone();
    let quoted = tracker.quotes()["AAPL"].current_price;
    assert_eq!(tracker.stock_value(&h), 10.0 * quoted);
}

#[test]
fn valuation_without_quotes_uses_cost_basis() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();

    // No refresh yet: empty map, valuation degrades to investment.
    let h = tracker.get_holding("AAPL").unwrap().clone();
    assert_eq!(tracker.stock_value(&h), 1500.0);
    assert_eq!(tracker.percent_change(&h), 0.0);
    assert_eq!(tracker.total_value(), 1500.0);
}

#[tokio::test]
async fn time_range_changes_next_fetch() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();

    tracker.refresh_quotes().await;
    let short = tracker.quotes()["AAPL"].percent_change;

    tracker.set_time_range(TimeRange::OneYear);
    assert_eq!(tracker.time_range(), TimeRange::OneYear);
    tracker.refresh_quotes().await;
    let long = tracker.quotes()["AAPL"].percent_change;

    assert_ne!(short, long);
}

#[tokio::test]
async fn removing_last_holding_then_refreshing_clears_quotes() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();
    tracker.refresh_quotes().await;
    assert!(!tracker.quotes().is_empty());

    tracker.remove_holding("AAPL");
    tracker.refresh_quotes().await;
    assert!(tracker.quotes().is_empty());
}

#[tokio::test]
async fn summary_reflects_quotes() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker.add_holding(&aapl_input()).unwrap();
    tracker
        .add_holding(&HoldingInput::with_shares("MSFT", "Microsoft", "300", "5"))
        .unwrap();
    tracker.refresh_quotes().await;

    let summary = tracker.summary();
    assert_eq!(summary.total_invested, 3000.0);
    assert_eq!(summary.total_value, tracker.total_value());
    assert_eq!(summary.holdings.len(), 2);

    let alloc: f64 = summary.holdings.iter().map(|h| h.allocation_pct).sum();
    assert!((alloc - 100.0).abs() < 1e-9);
}

// ═══════════════════════════════════════════════════════════════════
//  Import / export through the facade
// ═══════════════════════════════════════════════════════════════════

#[test]
fn export_import_round_trip_between_trackers() {
    let mut source = PortfolioTracker::in_memory();
    source.add_holding(&aapl_input()).unwrap();
    source
        .add_holding(&HoldingInput::with_shares("MSFT", "Microsoft", "300", "5"))
        .unwrap();
    let doc = source.export_document().unwrap();

    let mut target = PortfolioTracker::in_memory();
    let count = target.import_document(&doc, ImportMode::Replace).unwrap();
    assert_eq!(count, 2);
    assert_eq!(target.holdings(), source.holdings());
}

#[test]
fn merge_import_combines_positions() {
    let mut tracker = PortfolioTracker::in_memory();
    tracker
        .add_holding(&HoldingInput::with_shares("AAPL", "Apple Inc.", "100", "10"))
        .unwrap();

    let doc = r#"[{"symbol": "AAPL", "companyName": "Apple Inc.", "purchasePrice": 200.0, "shares": 10}]"#;
    tracker.import_document(doc, ImportMode::Merge).unwrap();

    let h = tracker.get_holding("AAPL").unwrap();
    assert_eq!(h.shares, 20);
    assert_eq!(h.investment, 3000.0);
    assert_eq!(h.purchase_price, 150.0);
}

#[test]
fn malformed_import_leaves_portfolio_and_store_untouched() {
    let store = Arc::new(MemoryStore::new());
    let mut tracker = tracker_with(Arc::clone(&store));
    tracker.add_holding(&aapl_input()).unwrap();
    let saved_before = store.read().unwrap();

    let err = tracker
        .import_document("this is not json", ImportMode::Replace)
        .unwrap_err();
    assert!(err.is_import());
    assert_eq!(tracker.holdings().len(), 1);
    assert_eq!(store.read().unwrap(), saved_before);
}

#[test]
fn imported_portfolio_persists() {
    let store = Arc::new(MemoryStore::new());
    let mut tracker = tracker_with(Arc::clone(&store));
    let doc = r#"[{"symbol": "GOOG", "companyName": "Alphabet", "purchasePrice": 120.0, "shares": 3}]"#;
    tracker.import_document(doc, ImportMode::Replace).unwrap();
    drop(tracker);

    let reloaded = tracker_with(store);
    assert_eq!(reloaded.get_holding("GOOG").unwrap().shares, 3);
}

#[test]
fn export_file_name_has_expected_shape() {
    let tracker = PortfolioTracker::in_memory();
    let name = tracker.export_file_name();
    assert!(name.starts_with("investment-portfolio-"));
    assert!(name.ends_with(".json"));
    // investment-portfolio-YYYY-MM-DD.json
    assert_eq!(name.len(), "investment-portfolio-".len() + 10 + ".json".len());
}
