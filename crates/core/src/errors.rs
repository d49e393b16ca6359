use thiserror::Error;

/// Unified error type for the entire portfolio-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// There are no fatal errors in this crate: validation and import errors
/// surface to the caller for re-prompting, while persistence and network
/// failures are absorbed by the fail-soft layers (`StorageManager`,
/// `QuoteGateway`) and only show up in logs.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Holding validation ──────────────────────────────────────────
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid purchase price: {0}")]
    InvalidPrice(String),

    #[error("Invalid share count: {0}")]
    InvalidShares(String),

    #[error("Invalid investment amount: {0}")]
    InvalidInvestment(String),

    // ── Import / document ───────────────────────────────────────────
    #[error("Failed to parse portfolio document: {0}")]
    ParseError(String),

    #[error("Invalid portfolio document: {0}")]
    SchemaError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Persistence ─────────────────────────────────────────────────
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),
}

impl CoreError {
    /// True for the field-level validation variants — bad user input that
    /// the caller should re-prompt for.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::MissingField(_)
                | CoreError::InvalidPrice(_)
                | CoreError::InvalidShares(_)
                | CoreError::InvalidInvestment(_)
        )
    }

    /// True for import failures — a rejected external document. The caller
    /// must keep the current portfolio unchanged.
    #[must_use]
    pub fn is_import(&self) -> bool {
        matches!(self, CoreError::ParseError(_) | CoreError::SchemaError(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::StorageUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::ParseError(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
