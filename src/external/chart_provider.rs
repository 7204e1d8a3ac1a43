use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

/// Window and bar width of a chart request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartRange {
    /// One day of hourly bars.
    Day,
    /// One month of daily bars; what quotes are derived from.
    #[default]
    Month,
    /// One year of weekly bars.
    Year,
}

impl ChartRange {
    pub fn range(self) -> &'static str {
        match self {
            ChartRange::Day => "1d",
            ChartRange::Month => "1mo",
            ChartRange::Year => "1y",
        }
    }

    pub fn interval(self) -> &'static str {
        match self {
            ChartRange::Day => "1h",
            ChartRange::Month => "1d",
            ChartRange::Year => "1wk",
        }
    }

    /// Whether bars are finer than a day, so their times need a clock part.
    pub fn is_intraday(self) -> bool {
        matches!(self, ChartRange::Day)
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.range())
    }
}

impl FromStr for ChartRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(ChartRange::Day),
            "1mo" => Ok(ChartRange::Month),
            "1y" => Ok(ChartRange::Year),
            other => Err(format!("unknown period '{other}' (expected 1d, 1mo or 1y)")),
        }
    }
}

/// Metadata block of a chart response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

/// Bars for one symbol as returned by the endpoint.
///
/// The price and volume columns are index-aligned with `timestamps` and keep
/// the endpoint's null gaps. Columns the endpoint omitted are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub meta: ChartMeta,
    pub timestamps: Vec<i64>,
    pub opens: Vec<Option<f64>>,
    pub highs: Vec<Option<f64>>,
    pub lows: Vec<Option<f64>>,
    pub closes: Vec<Option<f64>>,
    pub volumes: Vec<Option<u64>>,
}

#[derive(Debug, Error)]
pub enum ChartProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[async_trait]
pub trait ChartProvider: Send + Sync {
    async fn fetch_series(
        &self,
        symbol: &str,
        range: ChartRange,
    ) -> Result<ChartSeries, ChartProviderError>;

    /// Fetch the trailing one-month daily series for `symbol`.
    async fn fetch_daily_series(&self, symbol: &str) -> Result<ChartSeries, ChartProviderError> {
        self.fetch_series(symbol, ChartRange::Month).await
    }
}
