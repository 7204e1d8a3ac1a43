use serde::{Deserialize, Serialize};

// A single normalized market snapshot for one symbol, rebuilt on every fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_pct: f64,
    pub currency: String,
    pub volume: Option<u64>,
    pub is_favorable: bool,
    #[serde(default)]
    pub technicals: Technicals,
}

/// Indicator values derived from the close series the quote was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Technicals {
    pub ma_5: Option<f64>,
    pub ma_20: Option<f64>,
    pub rsi_14: Option<f64>,
    pub volatility_pct: Option<f64>,
    #[serde(default)]
    pub band: VolatilityBand,
    #[serde(default)]
    pub outlook: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VolatilityBand {
    #[default]
    Low,
    Medium,
    High,
}

/// Per-symbol result of one fetch attempt.
///
/// A dropped symbol never reaches the quote list; the reason is only kept for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(Quote),
    Dropped { symbol: String, reason: String },
}

impl FetchOutcome {
    pub fn into_quote(self) -> Option<Quote> {
        match self {
            FetchOutcome::Fetched(quote) => Some(quote),
            FetchOutcome::Dropped { .. } => None,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            FetchOutcome::Fetched(quote) => &quote.symbol,
            FetchOutcome::Dropped { symbol, .. } => symbol,
        }
    }
}
