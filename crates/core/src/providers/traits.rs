use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::{QuoteMap, TimeRange};

/// Trait abstraction for price feed backends.
///
/// The core only depends on the output shape (a symbol → quote map); any
/// backend — a real API client, the deterministic mock, a test double —
/// plugs in behind this seam. A provider may return a partial map (missing
/// symbols are a valid state), and per-symbol failures should be skipped
/// rather than failing the whole fetch.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch quotes for `symbols` with percent change measured over `range`.
    async fn fetch_quotes(
        &self,
        symbols: &[String],
        range: TimeRange,
    ) -> Result<QuoteMap, CoreError>;
}
