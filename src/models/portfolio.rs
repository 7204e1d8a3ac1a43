use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Quote;

// A user-saved symbol with the quote that was current when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub symbol: String,
    #[serde(default)]
    pub snapshot: Option<Quote>,
    pub added_at: DateTime<Utc>,
}

impl PortfolioEntry {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            snapshot: None,
            added_at: Utc::now(),
        }
    }

    pub fn from_quote(quote: Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            snapshot: Some(quote),
            added_at: Utc::now(),
        }
    }

    pub fn matches(&self, symbol: &str) -> bool {
        self.symbol.trim().eq_ignore_ascii_case(symbol.trim())
    }
}

/// Trimmed, ASCII-uppercased form under which symbols are stored.
pub fn canonical_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
